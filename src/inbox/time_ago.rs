//! Human-readable recency labels for roster rows

use chrono::{DateTime, Utc};

/// Format how long ago the last message of a conversation was sent
///
/// The prefix tells who sent it (`Sent ` for the viewer, `Received `
/// otherwise). Anything a week old or more shows the date instead.
pub fn format_time_ago(at: DateTime<Utc>, sent_by_viewer: bool, now: DateTime<Utc>) -> String {
    let prefix = if sent_by_viewer { "Sent " } else { "Received " };

    let elapsed = now.signed_duration_since(at);
    let mins = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    let label = if mins < 1 {
        "just now".to_string()
    } else if mins == 1 {
        "1 min ago".to_string()
    } else if mins < 60 {
        format!("{} mins ago", mins)
    } else if hours == 1 {
        "1 hour ago".to_string()
    } else if hours < 24 {
        format!("{} hours ago", hours)
    } else if days == 1 {
        "1 day ago".to_string()
    } else if days < 7 {
        format!("{} days ago", days)
    } else {
        at.format("%b %-d").to_string()
    };

    format!("{}{}", prefix, label)
}

/// Unread badge text, capped at `9+`
pub fn badge_label(count: usize) -> String {
    if count > 9 {
        "9+".to_string()
    } else {
        count.to_string()
    }
}
