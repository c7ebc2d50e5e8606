//! Integration tests for hatsync-display
//!
//! Uses wiremock to stand in for the display's HTTP server and verifies
//! request shapes and status handling of the DisplayClient.

mod common;

mod test_commands;
