// Test modules for Campus Chat
// Each module tests the corresponding source module

mod storage_tests;
mod support;
mod tui_tests;
