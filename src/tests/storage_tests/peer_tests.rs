// Peer Tests - Testing Peer decoding, Presence and initials

use crate::storage::{initials, Peer, Presence, RawPeer};
use crate::tests::support::at;

#[test]
fn test_presence_labels() {
    assert_eq!(Presence::Online.label(), "Active now");
    assert_eq!(Presence::Offline.label(), "Offline");
    assert!(Presence::Online.is_online());
    assert_eq!(Presence::default(), Presence::Offline);
}

#[test]
fn test_presence_serde_lowercase() {
    assert_eq!(serde_json::to_string(&Presence::Online).unwrap(), "\"online\"");
    let parsed: Presence = serde_json::from_str("\"offline\"").unwrap();
    assert_eq!(parsed, Presence::Offline);
}

#[test]
fn test_peer_from_raw_defaults() {
    let raw = RawPeer {
        uid: "u1".to_string(),
        ..Default::default()
    };

    let peer = Peer::from_raw(raw, at(42));
    assert_eq!(peer.name, "Unknown");
    assert_eq!(peer.status, Presence::Offline);
    assert!(peer.custom_status.is_empty());
    assert!(peer.photo_url.is_empty());
    assert_eq!(peer.last_seen, at(42));
    assert!(!peer.is_online());
}

#[test]
fn test_initials() {
    assert_eq!(initials("asha rao"), "AR");
    assert_eq!(initials("Chen"), "C");
    assert_eq!(initials("Mary Jane Watson"), "MJ");
    assert_eq!(initials("   "), "U");
    assert_eq!(initials(""), "U");
}

#[test]
fn test_peer_initials_uses_name() {
    let raw = RawPeer {
        uid: "u1".to_string(),
        name: Some("Dara Okafor".to_string()),
        ..Default::default()
    };
    assert_eq!(Peer::from_raw(raw, at(0)).initials(), "DO");
}
