//! Campus Chat - client core for a campus-wide chat
//!
//! This library derives everything the chat client shows from snapshots
//! pushed by an external document store: live (non-expired) messages,
//! unread counts, roster ordering, presence and time-ago labels.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod clock;
pub mod conversation;
pub mod inbox;
pub mod messaging;
pub mod roster;
pub mod storage;
pub mod store;
pub mod subscriptions;
pub mod tui;

/// Result type alias for Campus Chat operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Campus Chat operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Document store unreachable or rejected the request
    #[error("Store error: {0}")]
    Store(String),

    /// No authenticated viewer, or the auth provider failed
    #[error("Auth error: {0}")]
    Auth(String),

    /// Input rejected before reaching the store
    #[error("Validation error: {0}")]
    Validation(String),

    /// Local storage (read markers, settings) error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Listener could not be set up
    #[error("Subscription error: {0}")]
    Subscription(String),

    /// General I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// SQLite database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Initialize the Campus Chat library with logging
pub fn init() {
    tracing_subscriber::fmt::init();
}

#[cfg(test)]
mod tests;
