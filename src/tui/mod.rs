//! TUI (Terminal User Interface) module
//!
//! All TUI logic lives here, separate from the binary, so screens and
//! navigation can be tested without a terminal.

pub mod app;
pub mod demo;
pub mod screens;
pub mod types;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use screens::*;
pub use types::{Screen, Tab};
