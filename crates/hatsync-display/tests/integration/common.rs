//! Shared test helpers for display integration tests

use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hatsync_display::DisplayClient;

/// Starts a mock display that accepts every endpoint with 200 OK and
/// returns a (MockServer, DisplayClient) tuple.
pub async fn setup_display_mock() -> (MockServer, DisplayClient) {
    let server = MockServer::start().await;

    for endpoint in [
        "/post-set-img/",
        "/post_rotation/",
        "/post_orientation/",
        "/post_display_text/",
    ] {
        Mock::given(method("POST"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path("/show_temp/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = client_for(&server);
    (server, client)
}

/// Builds a client pointing at `server`
pub fn client_for(server: &MockServer) -> DisplayClient {
    DisplayClient::with_base_url(server.uri(), Duration::from_secs(2))
        .expect("build display client")
}
