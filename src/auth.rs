//! Authentication collaborator and session lifecycle
//!
//! The identity provider is external; the client only asks it who the
//! current viewer is. A [`Session`] ties that identity to the viewer's
//! presence record in the document store.

use crate::{
    clock::Clock,
    storage::{Peer, PeerRecord, Presence, ProfileUpdate},
    store::DocumentStore,
    Error, Result,
};
use std::sync::Arc;
use tracing::{error, info};

/// Maximum display name length, in characters
pub const MAX_NAME_CHARS: usize = 50;

/// Maximum status line length, in characters
pub const MAX_STATUS_CHARS: usize = 100;

/// Identity issued by the auth provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    /// Unique user id
    pub uid: String,
    /// Name from the identity provider, if any
    pub display_name: Option<String>,
    /// Email from the identity provider, if any
    pub email: Option<String>,
    /// Photo URL from the identity provider, if any
    pub photo_url: Option<String>,
}

impl Viewer {
    /// Identity with only a uid
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            display_name: None,
            email: None,
            photo_url: None,
        }
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Set the email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Source of the current viewer identity
pub trait AuthProvider: Send + Sync {
    /// The signed-in viewer, or `None` when unauthenticated
    fn current_viewer(&self) -> Option<Viewer>;
}

/// Auth provider with a fixed answer
#[derive(Debug, Clone, Default)]
pub struct StaticAuth {
    viewer: Option<Viewer>,
}

impl StaticAuth {
    /// Provider reporting `viewer` as signed in
    pub fn signed_in(viewer: Viewer) -> Self {
        Self {
            viewer: Some(viewer),
        }
    }

    /// Provider reporting nobody signed in
    pub fn signed_out() -> Self {
        Self { viewer: None }
    }
}

impl AuthProvider for StaticAuth {
    fn current_viewer(&self) -> Option<Viewer> {
        self.viewer.clone()
    }
}

/// Validate and normalise a profile update
///
/// Names are trimmed and must be non-empty and at most [`MAX_NAME_CHARS`];
/// status lines are trimmed and at most [`MAX_STATUS_CHARS`].
pub fn validate_profile_update(update: ProfileUpdate) -> Result<ProfileUpdate> {
    let name = match update.name {
        Some(name) => {
            let trimmed = name.trim().to_string();
            if trimmed.is_empty() {
                return Err(Error::Validation("Name is required".to_string()));
            }
            if trimmed.chars().count() > MAX_NAME_CHARS {
                return Err(Error::Validation(format!(
                    "Name must be at most {} characters",
                    MAX_NAME_CHARS
                )));
            }
            Some(trimmed)
        }
        None => None,
    };

    let custom_status = match update.custom_status {
        Some(status) => {
            let trimmed = status.trim().to_string();
            if trimmed.chars().count() > MAX_STATUS_CHARS {
                return Err(Error::Validation(format!(
                    "Status must be at most {} characters",
                    MAX_STATUS_CHARS
                )));
            }
            Some(trimmed)
        }
        None => None,
    };

    Ok(ProfileUpdate {
        name,
        custom_status,
        photo_url: update.photo_url,
    })
}

/// A signed-in viewer with an online presence record
pub struct Session {
    store: Arc<dyn DocumentStore>,
    viewer: Viewer,
    profile: Peer,
    fallback_profile: bool,
}

impl Session {
    /// Start a session for the current viewer
    ///
    /// Creates the viewer's user record on first sign-in, otherwise marks it
    /// online. If the store cannot be reached the session still starts with a
    /// local fallback profile built from the identity.
    ///
    /// # Errors
    /// Returns `Error::Auth` when nobody is signed in
    pub async fn start(
        store: Arc<dyn DocumentStore>,
        auth: &dyn AuthProvider,
        clock: &dyn Clock,
    ) -> Result<Self> {
        let viewer = auth
            .current_viewer()
            .ok_or_else(|| Error::Auth("No signed-in viewer".to_string()))?;

        let (profile, fallback_profile) = match Self::sync_presence(store.as_ref(), &viewer, clock).await {
            Ok(profile) => (profile, false),
            Err(e) => {
                error!("Failed to create or update user record for {}: {}", viewer.uid, e);
                (Self::fallback(&viewer, clock), true)
            }
        };

        info!("Session started for {}", viewer.uid);
        Ok(Self {
            store,
            viewer,
            profile,
            fallback_profile,
        })
    }

    async fn sync_presence(store: &dyn DocumentStore, viewer: &Viewer, clock: &dyn Clock) -> Result<Peer> {
        match store.fetch_peer(&viewer.uid).await? {
            None => {
                store
                    .create_peer(PeerRecord {
                        uid: viewer.uid.clone(),
                        name: viewer.display_name.clone().unwrap_or_else(|| "Anonymous".to_string()),
                        email: viewer.email.clone().unwrap_or_default(),
                        photo_url: viewer.photo_url.clone().unwrap_or_default(),
                        status: Presence::Online,
                    })
                    .await?;
            }
            Some(_) => {
                store.set_presence(&viewer.uid, Presence::Online).await?;
            }
        }

        let raw = store
            .fetch_peer(&viewer.uid)
            .await?
            .ok_or_else(|| Error::Store(format!("User record for {} vanished", viewer.uid)))?;
        Ok(Peer::from_raw(raw, clock.now()))
    }

    fn fallback(viewer: &Viewer, clock: &dyn Clock) -> Peer {
        Peer {
            uid: viewer.uid.clone(),
            name: viewer.display_name.clone().unwrap_or_else(|| "Anonymous".to_string()),
            email: viewer.email.clone().unwrap_or_default(),
            photo_url: viewer.photo_url.clone().unwrap_or_default(),
            status: Presence::Online,
            custom_status: String::new(),
            last_seen: clock.now(),
        }
    }

    /// The signed-in identity
    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    /// Viewer uid
    pub fn uid(&self) -> &str {
        &self.viewer.uid
    }

    /// Viewer's profile as last known locally
    pub fn profile(&self) -> &Peer {
        &self.profile
    }

    /// Whether the profile is a local fallback because the store failed
    pub fn is_fallback_profile(&self) -> bool {
        self.fallback_profile
    }

    /// Shared store handle
    pub fn store(&self) -> Arc<dyn DocumentStore> {
        self.store.clone()
    }

    /// Validate, write and locally apply a profile update
    pub async fn update_profile(&mut self, update: ProfileUpdate) -> Result<()> {
        let update = validate_profile_update(update)?;
        self.store.update_profile(&self.viewer.uid, update.clone()).await?;

        if let Some(name) = update.name {
            self.profile.name = name;
        }
        if let Some(custom_status) = update.custom_status {
            self.profile.custom_status = custom_status;
        }
        if let Some(photo_url) = update.photo_url {
            self.profile.photo_url = photo_url;
        }
        Ok(())
    }

    /// End the session and mark the viewer offline
    ///
    /// A failed presence write is logged; the session ends regardless.
    pub async fn end(self) {
        match self.store.set_presence(&self.viewer.uid, Presence::Offline).await {
            Ok(()) => info!("Session ended for {}", self.viewer.uid),
            Err(e) => error!("Failed to set {} offline: {}", self.viewer.uid, e),
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("viewer", &self.viewer)
            .field("profile", &self.profile)
            .field("fallback_profile", &self.fallback_profile)
            .finish()
    }
}
