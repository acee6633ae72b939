//! Sending messages
//!
//! Validates user input and appends it to the right conversation with the
//! lifespan of its chat kind.

use crate::{
    storage::{ChatKind, ConversationKey, NewMessage, Peer},
    store::DocumentStore,
    Error, Result,
};
use chrono::Duration;

/// Default maximum message length, in characters
pub const MAX_BODY_CHARS: usize = 500;

/// Trim a message and check it against the length limit
///
/// # Errors
/// Returns `Error::Validation` for empty (after trimming) or over-long input
pub fn validate_body(text: &str, max_chars: usize) -> Result<String> {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return Err(Error::Validation("Message is empty".to_string()));
    }

    let len = trimmed.chars().count();
    if len > max_chars {
        return Err(Error::Validation(format!(
            "Message is {} characters; the limit is {}",
            len, max_chars
        )));
    }

    Ok(trimmed.to_string())
}

/// Build the write request for a message
///
/// Group messages carry the author's name and photo so the group view can
/// render them without looking the author up.
pub fn build_message(kind: ChatKind, author: &Peer, body: String, ttl: Duration) -> NewMessage {
    let (sender_name, sender_photo) = match kind {
        ChatKind::Group => (Some(author.name.clone()), Some(author.photo_url.clone())),
        ChatKind::Private => (None, None),
    };

    NewMessage {
        text: body,
        sender_id: author.uid.clone(),
        sender_name,
        sender_photo,
        ttl_secs: ttl.num_seconds(),
    }
}

/// Validate and send a message
///
/// # Arguments
/// * `store` - Document store to append to
/// * `kind` - Group or private chat
/// * `key` - Conversation to append to
/// * `author` - The viewer's profile
/// * `text` - Raw user input
///
/// # Returns
/// The store-assigned message id
///
/// # Example
/// ```rust,no_run
/// use campus_chat::messaging::send_message;
/// use campus_chat::storage::{ChatKind, ConversationKey, Peer};
/// use campus_chat::store::MemoryStore;
///
/// # async fn example(author: Peer) -> campus_chat::Result<()> {
/// let store = MemoryStore::new();
/// let key = ConversationKey::pair(&author.uid, "bob");
/// let id = send_message(&store, ChatKind::Private, &key, &author, "  hi bob ").await?;
/// println!("sent {}", id);
/// # Ok(())
/// # }
/// ```
pub async fn send_message(
    store: &dyn DocumentStore,
    kind: ChatKind,
    key: &ConversationKey,
    author: &Peer,
    text: &str,
) -> Result<String> {
    send_message_with_limits(store, kind, key, author, text, MAX_BODY_CHARS, kind.ttl()).await
}

/// Validate and send a message with explicit length limit and lifespan
pub async fn send_message_with_limits(
    store: &dyn DocumentStore,
    kind: ChatKind,
    key: &ConversationKey,
    author: &Peer,
    text: &str,
    max_chars: usize,
    ttl: Duration,
) -> Result<String> {
    let body = validate_body(text, max_chars)?;
    if ttl <= Duration::zero() {
        return Err(Error::Validation("Message lifespan must be positive".to_string()));
    }
    let message = build_message(kind, author, body, ttl);

    match store.append_message(key, message).await {
        Ok(id) => {
            tracing::info!("Message {} sent to {}", id, key);
            Ok(id)
        }
        Err(e) => {
            tracing::warn!("Failed to send message to {}: {}", key, e);
            Err(e)
        }
    }
}
