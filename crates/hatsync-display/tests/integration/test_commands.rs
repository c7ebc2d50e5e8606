//! Request shape and acceptance handling for each display endpoint

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hatsync_core::ports::{DisplayText, IDisplayNotifier};
use hatsync_display::DisplayError;

use crate::common;

#[tokio::test]
async fn test_all_endpoints_accepted() {
    let (_server, client) = common::setup_display_mock().await;

    client.post_image(&json!({"base": [0, 120, 0]})).await.unwrap();
    client.post_rotation(&json!({"cmd": "kill"})).await.unwrap();
    client.show_default_view().await.unwrap();
    client.post_orientation(&json!({"rotation": 90})).await.unwrap();
    client
        .post_text(&DisplayText {
            text_str: "hello".into(),
            text_color: [1, 2, 3],
            back_color: [4, 5, 6],
            scroll: false,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_image_body_is_posted_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/post-set-img/"))
        .and(body_json(json!({"base": [200, 0, 0]})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    client.set_image(&json!({"base": [200, 0, 0]})).await.unwrap();
}

#[tokio::test]
async fn test_display_text_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/post_display_text/"))
        .and(body_json(json!({
            "text_str": "!! nas is offline !!",
            "text_color": [255, 255, 255],
            "back_color": [200, 0, 0],
            "scroll": true
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    client
        .display_text(&DisplayText {
            text_str: "!! nas is offline !!".into(),
            text_color: [255, 255, 255],
            back_color: [200, 0, 0],
            scroll: true,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_non_200_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/post_rotation/"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    let err = client
        .post_rotation(&json!({"cmd": "simple"}))
        .await
        .unwrap_err();

    match err {
        DisplayError::Rejected { endpoint, status } => {
            assert_eq!(endpoint, "/post_rotation/");
            assert_eq!(status.as_u16(), 400);
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn test_other_success_codes_are_not_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/show_temp/"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    assert!(client.show_default().await.is_err());
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Reserve a free port, then release it so nothing is listening there.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let client = hatsync_display::DisplayClient::new(
        &format!("127.0.0.1:{port}"),
        std::time::Duration::from_secs(2),
    )
    .unwrap();

    let err = client.post_image(&json!({})).await.unwrap_err();
    assert!(matches!(err, DisplayError::NetworkError(_)));
}
