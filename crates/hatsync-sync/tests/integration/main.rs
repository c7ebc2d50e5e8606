//! Integration tests for hatsync-sync
//!
//! Runs the notified sync end to end: real directory mirroring into temp
//! directories, with wiremock standing in for the display.

mod common;

mod test_notified_sync;
