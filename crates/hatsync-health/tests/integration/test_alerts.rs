//! Health check to display alert flow

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hatsync_core::config::ConfigBuilder;
use hatsync_core::ports::IReachabilityCheck;
use hatsync_display::DisplayClient;
use hatsync_health::alerter::Alerter;
use hatsync_health::monitor::HealthMonitor;
use hatsync_health::prober::Prober;

/// Fails twice for every address, then succeeds only for `10.0.0.1`
#[derive(Default)]
struct FlakyThenUp {
    attempts: Mutex<HashMap<String, usize>>,
}

impl FlakyThenUp {
    fn total_calls(&self) -> usize {
        self.attempts.lock().unwrap().values().sum()
    }
}

#[async_trait::async_trait]
impl IReachabilityCheck for FlakyThenUp {
    async fn check(&self, address: &str) -> anyhow::Result<i32> {
        let mut attempts = self.attempts.lock().unwrap();
        let seen = attempts.entry(address.to_string()).or_insert(0);
        *seen += 1;
        if address == "10.0.0.1" && *seen >= 3 {
            return Ok(0);
        }
        Ok(2)
    }
}

async fn display_server(status: u16) -> MockServer {
    let server = MockServer::start().await;
    for endpoint in ["/post_orientation/", "/post_display_text/"] {
        Mock::given(method("POST"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;
    }
    server
}

async fn bodies(server: &MockServer) -> Vec<(String, Value)> {
    server
        .received_requests()
        .await
        .expect("request recording enabled")
        .into_iter()
        .map(|r| {
            (
                r.url.path().to_string(),
                serde_json::from_slice(&r.body).unwrap_or(Value::Null),
            )
        })
        .collect()
}

#[tokio::test]
async fn test_unresponsive_hosts_are_alerted_in_order() {
    let config = ConfigBuilder::new()
        .host("nas", "10.0.0.1")
        .host("printer", "10.0.0.2")
        .host("camera", "10.0.0.3")
        .max_attempts(3)
        .build();

    let check = Arc::new(FlakyThenUp::default());
    let monitor = HealthMonitor::new(Prober::new(check.clone()));
    let report = monitor
        .check(&config.health.hosts, config.health.max_attempts)
        .await;

    assert_eq!(report.names(), &["printer".to_string(), "camera".to_string()]);
    assert_eq!(check.total_calls(), 9);

    let server = display_server(200).await;
    let client = DisplayClient::with_base_url(server.uri(), Duration::from_secs(2)).unwrap();
    let summary = Alerter::new(Arc::new(client), &config.alert)
        .alert(report.names(), 2)
        .await;

    assert_eq!(summary.delivered, 4);
    let seen = bodies(&server).await;
    assert_eq!(seen.len(), 5);
    assert_eq!(seen[0].0, "/post_orientation/");
    assert_eq!(seen[0].1, json!({"rotation": 0}));

    let texts: Vec<&str> = seen[1..]
        .iter()
        .map(|(_, body)| body["text_str"].as_str().unwrap())
        .collect();
    assert_eq!(
        texts,
        vec![
            "!! printer is offline !!",
            "!! camera is offline !!",
            "!! printer is offline !!",
            "!! camera is offline !!",
        ]
    );
    assert_eq!(seen[1].1["back_color"], json!([200, 0, 0]));
    assert_eq!(seen[1].1["scroll"], json!(true));
}

#[tokio::test]
async fn test_rejecting_display_is_summarised() {
    let server = display_server(500).await;
    let client = DisplayClient::with_base_url(server.uri(), Duration::from_secs(2)).unwrap();
    let config = ConfigBuilder::new().build();

    let summary = Alerter::new(Arc::new(client), &config.alert)
        .alert(&["nas".to_string()], 2)
        .await;

    assert!(!summary.orientation_set);
    assert_eq!(summary.failed, 2);
    assert_eq!(bodies(&server).await.len(), 3);
}
