// Conversation Key Tests - Testing ConversationKey

use crate::storage::ConversationKey;

#[test]
fn test_pair_is_symmetric() {
    assert_eq!(ConversationKey::pair("bob", "alice"), ConversationKey::pair("alice", "bob"));
    assert_eq!(ConversationKey::pair("bob", "alice").as_str(), "alice_bob");
}

#[test]
fn test_group_key() {
    let key = ConversationKey::group();
    assert_eq!(key.as_str(), "public");
}

#[test]
fn test_read_marker_key() {
    let key = ConversationKey::pair("u2", "u1");
    assert_eq!(key.read_marker_key(), "lastRead_u1_u2");
}

#[test]
fn test_display_matches_raw_key() {
    let key = ConversationKey::pair("x", "y");
    assert_eq!(key.to_string(), "x_y");
}
