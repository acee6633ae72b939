// Storage Tests Module - Testing the storage module
// Tests organized by storage module functionality:
// - conversation_key_tests: pair/group keys and read marker keys
// - message_tests: raw message decoding, chat kinds and clock labels
// - peer_tests: peer decoding, presence labels and initials
// - read_markers_tests: marker reads, writes and monotonicity
// - storage_db_tests: SQLite key-value persistence
// - settings_tests: Settings defaults and persistence

mod conversation_key_tests;
mod message_tests;
mod peer_tests;
mod read_markers_tests;
