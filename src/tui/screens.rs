//! Per-screen input and selection state

use crate::storage::{Peer, ProfileUpdate};

/// Chat screen state, shared by the group and private chats
#[derive(Debug, Default)]
pub struct ChatScreen {
    /// Input buffer for message composition
    pub input: String,
    /// Scroll offset from the newest message
    pub scroll_offset: usize,
    /// Status message
    pub status_message: Option<String>,
}

impl ChatScreen {
    /// Create new chat screen
    pub fn new() -> Self {
        Self::default()
    }

    /// Add character to input
    pub fn add_char(&mut self, c: char) {
        self.input.push(c);
    }

    /// Remove last character from input
    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Clear input buffer
    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    /// Scroll towards older messages
    pub fn scroll_up(&mut self, max_offset: usize) {
        if self.scroll_offset < max_offset {
            self.scroll_offset += 1;
        }
    }

    /// Scroll towards the newest message
    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// Set status message
    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

/// Roster screen state
#[derive(Debug, Default)]
pub struct RosterScreen {
    /// Selected row index
    pub selected_index: usize,
    /// Status message
    pub status_message: Option<String>,
}

impl RosterScreen {
    /// Create new roster screen
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to next row
    pub fn next(&mut self, row_count: usize) {
        if row_count > 0 {
            self.selected_index = (self.selected_index + 1) % row_count;
        }
    }

    /// Move to previous row
    pub fn previous(&mut self, row_count: usize) {
        if row_count > 0 {
            if self.selected_index > 0 {
                self.selected_index -= 1;
            } else {
                self.selected_index = row_count - 1;
            }
        }
    }

    /// Keep the selection inside the list after it shrank
    pub fn clamp(&mut self, row_count: usize) {
        if self.selected_index >= row_count {
            self.selected_index = row_count.saturating_sub(1);
        }
    }

    /// Set status message
    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

/// Which profile field has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    /// Display name
    Name,
    /// Custom status line
    Status,
}

/// Profile screen state
#[derive(Debug)]
pub struct ProfileScreen {
    /// Name input buffer
    pub name_input: String,
    /// Status input buffer
    pub status_input: String,
    /// Focused field
    pub selected_field: ProfileField,
    /// Status/confirmation message
    pub status_message: Option<String>,
    /// Whether status is an error
    pub is_error: bool,
}

impl ProfileScreen {
    /// Create profile screen prefilled from the current profile
    pub fn new(profile: &Peer) -> Self {
        Self {
            name_input: profile.name.clone(),
            status_input: profile.custom_status.clone(),
            selected_field: ProfileField::Name,
            status_message: None,
            is_error: false,
        }
    }

    fn focused(&mut self) -> &mut String {
        match self.selected_field {
            ProfileField::Name => &mut self.name_input,
            ProfileField::Status => &mut self.status_input,
        }
    }

    /// Add character to the focused field
    pub fn add_char(&mut self, c: char) {
        self.focused().push(c);
    }

    /// Remove last character from the focused field
    pub fn backspace(&mut self) {
        self.focused().pop();
    }

    /// Clear the focused field
    pub fn clear_input(&mut self) {
        self.focused().clear();
    }

    /// Switch focus between fields
    pub fn toggle_field(&mut self) {
        self.selected_field = match self.selected_field {
            ProfileField::Name => ProfileField::Status,
            ProfileField::Status => ProfileField::Name,
        };
    }

    /// Build the update for both fields
    pub fn to_update(&self) -> ProfileUpdate {
        ProfileUpdate {
            name: Some(self.name_input.clone()),
            custom_status: Some(self.status_input.clone()),
            photo_url: None,
        }
    }

    /// Show a confirmation
    pub fn set_saved(&mut self, message: String) {
        self.status_message = Some(message);
        self.is_error = false;
    }

    /// Show an error
    pub fn set_error(&mut self, message: String) {
        self.status_message = Some(message);
        self.is_error = true;
    }
}
