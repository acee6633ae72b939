// TUI Tests Module - Testing the public tui module
// Tests organized by TUI module structure:
// - app_tests: App struct driven against the demo store
// - screens_tests: ChatScreen, RosterScreen and ProfileScreen
// - types_tests: Screen and Tab navigation
// - ui_tests: UI helpers and full-frame rendering

mod app_tests;
mod ui_tests;
