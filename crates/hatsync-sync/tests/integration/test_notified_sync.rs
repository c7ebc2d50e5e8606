//! End-to-end dispositions of a notified sync

use serde_json::{json, Value};
use wiremock::MockServer;

use hatsync_core::domain::Disposition;

use crate::common::{self, Fixture};

/// (method, path, body) of every request the display received, in order
async fn requests(server: &MockServer) -> Vec<(String, String, Value)> {
    server
        .received_requests()
        .await
        .expect("request recording enabled")
        .into_iter()
        .map(|r| {
            let body = serde_json::from_slice(&r.body).unwrap_or(Value::Null);
            (r.method.to_string(), r.url.path().to_string(), body)
        })
        .collect()
}

#[tokio::test]
async fn test_all_green_mirrors_and_drives_display() {
    let fx = Fixture::new();
    fx.write("src/docs/readme.txt", "hello");
    fx.write("src/build.log", "noise");
    let server = common::display_answering(200).await;

    let config = fx.config(&[("src", "dst")]);
    let run = common::notified_sync(&server, &config)
        .run(&["local"])
        .await
        .unwrap();

    assert_eq!(run.disposition, Disposition::AllGreen);
    assert_eq!(run.outcome.attempted(), 1);
    assert!(run.outcome.is_fully_successful());
    assert_eq!(
        std::fs::read_to_string(fx.path("dst/docs/readme.txt")).unwrap(),
        "hello"
    );
    assert!(!fx.path("dst/build.log").exists());
    assert!(fx.markers().is_empty());

    let seen = requests(&server).await;
    let steps: Vec<(&str, &str)> = seen
        .iter()
        .map(|(m, p, _)| (m.as_str(), p.as_str()))
        .collect();
    assert_eq!(
        steps,
        vec![
            ("POST", "/post-set-img/"),
            ("POST", "/post_rotation/"),
            ("POST", "/post_rotation/"),
            ("POST", "/post-set-img/"),
            ("GET", "/show_temp/"),
        ]
    );
    assert_eq!(seen[0].2, json!({"base": [0, 0, 120]}));
    assert_eq!(seen[1].2["cmd"], "simple");
    assert_eq!(seen[2].2, json!({"cmd": "kill"}));
    assert_eq!(seen[3].2, json!({"base": [0, 120, 0]}));
}

#[tokio::test]
async fn test_failed_unit_turns_display_red() {
    let fx = Fixture::new();
    fx.write("src/a.txt", "a");
    let server = common::display_answering(200).await;

    let config = fx.config(&[("src", "dst"), ("missing", "dst2")]);
    let run = common::notified_sync(&server, &config)
        .run(&["local"])
        .await
        .unwrap();

    assert_eq!(run.disposition, Disposition::SyncFailedNotifierUp);
    assert_eq!(run.outcome.attempted(), 2);
    assert_eq!(run.outcome.completed_without_error(), 1);
    assert!(fx.path("dst/a.txt").exists());

    let markers = fx.markers();
    assert_eq!(markers.len(), 1);
    assert!(markers[0].starts_with("local_sync_failed_at_"));

    let seen = requests(&server).await;
    let last = seen.last().unwrap();
    assert_eq!(last.1, "/post-set-img/");
    assert_eq!(last.2, json!({"base": [200, 0, 0]}));
    assert!(seen.iter().all(|(_, p, _)| p != "/show_temp/"));
}

#[tokio::test]
async fn test_rejecting_display_still_syncs() {
    let fx = Fixture::new();
    fx.write("src/a.txt", "a");
    let server = common::display_answering(500).await;

    let config = fx.config(&[("src", "dst")]);
    let run = common::notified_sync(&server, &config)
        .run(&["local"])
        .await
        .unwrap();

    assert_eq!(run.disposition, Disposition::SyncSucceededNotifierDown);
    assert!(!run.notifier_reachable);
    assert!(fx.path("dst/a.txt").exists());
    assert_eq!(fx.markers().len(), 1);
    assert!(fx.markers()[0].starts_with("pi_dead_at_"));

    // Only the first reachability post was attempted.
    assert_eq!(requests(&server).await.len(), 1);
}

#[tokio::test]
async fn test_everything_failed_is_fatal() {
    let fx = Fixture::new();
    let server = common::display_answering(503).await;

    let config = fx.config(&[("missing", "dst")]);
    let run = common::notified_sync(&server, &config)
        .run(&["local"])
        .await
        .unwrap();

    assert_eq!(run.disposition, Disposition::Catastrophic);
    assert!(run.is_fatal());
    let marker = run.marker.expect("marker written");
    assert!(marker.exists());
    assert!(marker
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("local_sync_and_pi_failed_at_"));
}

#[tokio::test]
async fn test_unreachable_display_address() {
    let fx = Fixture::new();
    fx.write("src/a.txt", "a");

    // Reserve a port, then release it so nothing is listening there.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let display = hatsync_display::DisplayClient::new(
        &format!("127.0.0.1:{port}"),
        std::time::Duration::from_secs(2),
    )
    .unwrap();
    let config = fx.config(&[("src", "dst")]);
    let sync = hatsync_sync::notified::NotifiedSync::new(
        std::sync::Arc::new(hatsync_sync::filesystem::DirMirror::new()),
        std::sync::Arc::new(display),
        &config,
    );

    let run = sync.run(&["local"]).await.unwrap();

    assert_eq!(run.disposition, Disposition::SyncSucceededNotifierDown);
    assert!(fx.path("dst/a.txt").exists());
}
