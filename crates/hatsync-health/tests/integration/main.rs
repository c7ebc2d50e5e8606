//! Integration tests for hatsync-health
//!
//! Drives the alerter through the real display client against a wiremock
//! server, and the monitor through scripted reachability checks.

mod test_alerts;
