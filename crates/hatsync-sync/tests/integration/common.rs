//! Shared fixtures for notified sync tests

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hatsync_core::config::{Config, ConfigBuilder};
use hatsync_display::DisplayClient;
use hatsync_sync::filesystem::DirMirror;
use hatsync_sync::notified::NotifiedSync;

/// Temp directories backing one test run
pub struct Fixture {
    pub root: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    pub fn write(&self, relative: &str, contents: &str) {
        let path = self.path(relative);
        std::fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
        std::fs::write(path, contents).expect("write file");
    }

    pub fn output_dir(&self) -> PathBuf {
        self.path("output")
    }

    pub fn markers(&self) -> Vec<String> {
        let mut names: Vec<String> = match std::fs::read_dir(self.output_dir()) {
            Ok(entries) => entries
                .map(|e| e.expect("dir entry").file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        };
        names.sort();
        names
    }

    /// Config with a `local` group of `pairs` (relative to the fixture root)
    pub fn config(&self, pairs: &[(&str, &str)]) -> Config {
        let pairs: Vec<(String, PathBuf)> = pairs
            .iter()
            .map(|(s, d)| (self.path(s).to_string_lossy().into_owned(), self.path(d)))
            .collect();
        ConfigBuilder::new()
            .sync_group("local", pairs)
            .output_dir(self.output_dir())
            .hold_secs(0)
            .build()
    }
}

/// Mounts `status` on every display endpoint
pub async fn display_answering(status: u16) -> MockServer {
    let server = MockServer::start().await;
    for endpoint in ["/post-set-img/", "/post_rotation/"] {
        Mock::given(method("POST"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/show_temp/"))
        .respond_with(ResponseTemplate::new(status))
        .mount(&server)
        .await;
    server
}

pub fn notified_sync(server: &MockServer, config: &Config) -> NotifiedSync {
    let display = DisplayClient::with_base_url(server.uri(), Duration::from_secs(2))
        .expect("build display client");
    NotifiedSync::new(Arc::new(DirMirror::new()), Arc::new(display), config)
}
