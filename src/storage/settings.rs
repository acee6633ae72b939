//! Client settings and configuration

use crate::{storage::message::ChatKind, Error, Result};
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Longest accepted group message lifespan, in hours
pub const MAX_GROUP_TTL_HOURS: i64 = 24 * 365;

/// Longest accepted private message lifespan, in days
pub const MAX_PRIVATE_TTL_DAYS: i64 = 3650;

/// Client settings
///
/// Stored as JSON; missing fields take their defaults so older files keep
/// loading.
///
/// # Example
/// ```rust,no_run
/// use campus_chat::storage::Settings;
///
/// let mut settings = Settings::load("settings.json").expect("Failed to load");
/// settings.poll_interval_ms = 10_000;
/// settings.save("settings.json").expect("Failed to save");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Interval of the fallback unread re-computation, in milliseconds
    pub poll_interval_ms: u64,
    /// Number of newest messages fetched per conversation
    pub page_size: usize,
    /// Lifespan of group chat messages, in hours
    pub group_ttl_hours: i64,
    /// Lifespan of private chat messages, in days
    pub private_ttl_days: i64,
    /// Maximum message length, in characters
    pub max_body_chars: usize,
    /// Time zone offset for clock labels, in minutes east of UTC
    pub display_offset_minutes: i32,
    /// Directory for local state (read markers)
    pub storage_path: String,
}

impl Settings {
    /// Load settings from a JSON file
    ///
    /// # Returns
    /// The loaded settings, or default settings if the file doesn't exist or is empty
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let data = std::fs::read_to_string(path)
            .map_err(|e| Error::Storage(format!("Failed to read settings: {}", e)))?;

        if data.trim().is_empty() {
            return Ok(Self::default());
        }

        let settings: Self = serde_json::from_str(&data)
            .map_err(|e| Error::Storage(format!("Failed to parse settings: {}", e)))?;
        settings.validate()?;

        Ok(settings)
    }

    /// Check that both lifespans are positive and within bounds
    ///
    /// # Errors
    /// Returns `Error::Storage` naming the offending field
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_GROUP_TTL_HOURS).contains(&self.group_ttl_hours) {
            return Err(Error::Storage(format!(
                "group_ttl_hours must be between 1 and {}, got {}",
                MAX_GROUP_TTL_HOURS, self.group_ttl_hours
            )));
        }
        if !(1..=MAX_PRIVATE_TTL_DAYS).contains(&self.private_ttl_days) {
            return Err(Error::Storage(format!(
                "private_ttl_days must be between 1 and {}, got {}",
                MAX_PRIVATE_TTL_DAYS, self.private_ttl_days
            )));
        }
        Ok(())
    }

    /// Save settings to a JSON file, creating parent directories
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Storage(format!("Failed to create settings directory: {}", e)))?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Storage(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(path, json)
            .map_err(|e| Error::Storage(format!("Failed to write settings: {}", e)))?;

        Ok(())
    }

    /// Lifespan for new messages of `kind`
    ///
    /// Values outside the accepted range are clamped into it.
    pub fn ttl_for(&self, kind: ChatKind) -> Duration {
        match kind {
            ChatKind::Group => Duration::hours(self.group_ttl_hours.clamp(1, MAX_GROUP_TTL_HOURS)),
            ChatKind::Private => Duration::days(self.private_ttl_days.clamp(1, MAX_PRIVATE_TTL_DAYS)),
        }
    }

    /// Poll interval as a std duration, never below 100ms
    pub fn poll_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.poll_interval_ms.max(100))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 5_000,
            page_size: 50,
            group_ttl_hours: ChatKind::Group.ttl().num_hours(),
            private_ttl_days: ChatKind::Private.ttl().num_days(),
            max_body_chars: 500,
            display_offset_minutes: 330, // UTC+05:30
            storage_path: "./campus_data".to_string(),
        }
    }
}
