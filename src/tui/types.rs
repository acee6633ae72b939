//! Core types for TUI screens and navigation

/// Application screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Campus-wide group chat
    GroupChat,
    /// Peer list with unread badges and presence
    Roster,
    /// One-to-one chat opened from the roster
    PrivateChat,
    /// Edit own name and status
    Profile,
}

/// Top-level tabs, cycled with Tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    /// Group chat tab
    Group,
    /// Roster tab
    Roster,
    /// Profile tab
    Profile,
}

impl Tab {
    /// Get all tabs in order
    pub fn all() -> Vec<Self> {
        vec![Self::Group, Self::Roster, Self::Profile]
    }

    /// Get display label for tab
    pub fn label(&self) -> &'static str {
        match self {
            Self::Group => "Campus",
            Self::Roster => "People",
            Self::Profile => "Profile",
        }
    }

    /// Screen the tab opens
    pub fn screen(&self) -> Screen {
        match self {
            Self::Group => Screen::GroupChat,
            Self::Roster => Screen::Roster,
            Self::Profile => Screen::Profile,
        }
    }

    /// Tab a screen belongs to
    ///
    /// A private chat lives under the roster tab.
    pub fn for_screen(screen: Screen) -> Self {
        match screen {
            Screen::GroupChat => Self::Group,
            Screen::Roster | Screen::PrivateChat => Self::Roster,
            Screen::Profile => Self::Profile,
        }
    }

    /// Next tab, wrapping around
    pub fn next(&self) -> Self {
        match self {
            Self::Group => Self::Roster,
            Self::Roster => Self::Profile,
            Self::Profile => Self::Group,
        }
    }
}
