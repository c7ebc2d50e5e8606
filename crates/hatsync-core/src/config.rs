//! Configuration module for hatsync.
//!
//! Provides typed configuration structs that map to the YAML (or JSON)
//! configuration file, with loading, validation, defaults, and a builder
//! pattern for programmatic use.
//!
//! Maps whose order matters (sync pairs, monitored hosts) are stored in an
//! [`OrderedMap`], which keeps the order in which entries appear in the file.

use std::fmt;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};

use crate::domain::{DEFAULT_EXCLUDE_PATTERN, DEFAULT_MAX_ATTEMPTS};
use crate::ports::Rgb;

// ---------------------------------------------------------------------------
// OrderedMap
// ---------------------------------------------------------------------------

/// A string-keyed map that preserves insertion order.
///
/// Serializes as a plain map. A repeated key replaces the earlier value but
/// keeps its original position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts or replaces `key`, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = OrderedMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct OrderedMapVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
    type Value = OrderedMap<V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map with string keys")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = OrderedMap::new();
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            map.insert(key, value);
        }
        Ok(map)
    }

    // An empty YAML section (`hosts:`) parses as null.
    fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(OrderedMap::new())
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(OrderedMapVisitor(PhantomData))
    }
}

// ---------------------------------------------------------------------------
// Config struct with sub-sections
// ---------------------------------------------------------------------------

/// Top-level configuration for hatsync.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sync: SyncConfig,
    pub notifier: NotifierConfig,
    pub health: HealthConfig,
    pub alert: AlertConfig,
    pub logging: LoggingConfig,
}

/// Backup synchronization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Group key -> ordered `source: destination` pairs.
    pub groups: OrderedMap<OrderedMap<PathBuf>>,
    /// Regex of relative paths skipped by every sync unit.
    pub exclude_pattern: String,
    /// Directory receiving failure marker files.
    pub output_dir: PathBuf,
    /// Upper bound, in seconds, on how long the orchestrator waits for one
    /// unit. Unset waits indefinitely.
    pub unit_timeout_secs: Option<u64>,
}

/// Remote display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifierConfig {
    /// `host:port` of the display's HTTP server.
    pub address: String,
    /// Image posted while a sync is running.
    pub sync_image: Value,
    /// Seconds the green success screen is held before restoring the default view.
    pub hold_secs: u64,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

/// Host health-check settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    /// Host name -> address, probed in this order.
    pub hosts: OrderedMap<String>,
    /// Probe attempts before a host is declared unresponsive.
    pub max_attempts: u32,
    /// How many times the alert list is cycled on the display.
    pub repeat_count: u32,
    /// Program used for one reachability attempt.
    pub ping_command: String,
    /// Arguments placed before the address.
    pub ping_args: Vec<String>,
}

/// Alert message appearance on the display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Orientation payload posted before the alerts.
    pub orientation: Value,
    pub text_color: Rgb,
    pub back_color: Rgb,
    pub scroll: bool,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
}

// ---------------------------------------------------------------------------
// Config::load()
// ---------------------------------------------------------------------------

impl Config {
    /// Load configuration from `path`.
    ///
    /// Files ending in `.json` are parsed as JSON, everything else as YAML.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let config = if is_json {
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON in {}", path.display()))?
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Invalid YAML in {}", path.display()))?
        };
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/hatsync/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("hatsync")
            .join("config.yaml")
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            groups: OrderedMap::new(),
            exclude_pattern: DEFAULT_EXCLUDE_PATTERN.to_string(),
            output_dir: dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("~/.local/share"))
                .join("hatsync")
                .join("output"),
            unit_timeout_secs: None,
        }
    }
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:8082".to_string(),
            sync_image: json!({ "base": [0, 0, 120] }),
            hold_secs: 2,
            request_timeout_secs: 10,
        }
    }
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            hosts: OrderedMap::new(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            repeat_count: 2,
            ping_command: "ping".to_string(),
            ping_args: vec!["-c".to_string(), "1".to_string()],
        }
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            orientation: json!({ "rotation": 0 }),
            text_color: [255, 255, 255],
            back_color: [200, 0, 0],
            scroll: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config::validate()
// ---------------------------------------------------------------------------

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"health.max_attempts"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Valid values for `logging.level`.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let mut push = |field: &str, message: String| {
            errors.push(ValidationError {
                field: field.into(),
                message,
            })
        };

        // --- sync ---
        if let Err(e) = regex::Regex::new(&self.sync.exclude_pattern) {
            push(
                "sync.exclude_pattern",
                format!("invalid regex '{}': {e}", self.sync.exclude_pattern),
            );
        }
        if self.sync.unit_timeout_secs == Some(0) {
            push("sync.unit_timeout_secs", "must be greater than 0".into());
        }
        for (key, pairs) in self.sync.groups.iter() {
            if key.trim().is_empty() {
                push("sync.groups", "group keys must not be empty".into());
            }
            if pairs.is_empty() {
                push(
                    &format!("sync.groups.{key}"),
                    "group must map at least one source to a destination".into(),
                );
            }
            for (source, destination) in pairs.iter() {
                if source.trim().is_empty() || destination.as_os_str().is_empty() {
                    push(
                        &format!("sync.groups.{key}"),
                        "source and destination paths must not be empty".into(),
                    );
                }
            }
        }

        // --- notifier ---
        if self.notifier.address.trim().is_empty() {
            push("notifier.address", "must not be empty".into());
        }
        if self.notifier.request_timeout_secs == 0 {
            push("notifier.request_timeout_secs", "must be greater than 0".into());
        }

        // --- health ---
        if self.health.max_attempts == 0 {
            push("health.max_attempts", "must be greater than 0".into());
        }
        if self.health.repeat_count == 0 {
            push("health.repeat_count", "must be greater than 0".into());
        }
        if self.health.ping_command.trim().is_empty() {
            push("health.ping_command", "must not be empty".into());
        }
        for (name, address) in self.health.hosts.iter() {
            if address.trim().is_empty() {
                push(&format!("health.hosts.{name}"), "address must not be empty".into());
            }
        }

        // --- logging ---
        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            push(
                "logging.level",
                format!(
                    "invalid level '{}'; valid options: {}",
                    self.logging.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            );
        }

        errors
    }
}

// ---------------------------------------------------------------------------
// ConfigBuilder
// ---------------------------------------------------------------------------

/// Builder for constructing a [`Config`] programmatically.
///
/// Starts from [`Config::default`] and allows selective overrides.
///
/// # Example
///
/// ```rust,no_run
/// use hatsync_core::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .sync_group("local", [("/home/me/docs", "/mnt/backup/docs")])
///     .notifier_address("192.168.1.155:8082")
///     .host("nas", "192.168.1.20")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder initialised with [`Config::default`] values.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    // --- sync ---

    /// Adds (or replaces) a sync group; pairs keep the given order.
    pub fn sync_group<S, D>(
        mut self,
        key: impl Into<String>,
        pairs: impl IntoIterator<Item = (S, D)>,
    ) -> Self
    where
        S: Into<String>,
        D: Into<PathBuf>,
    {
        let pairs: OrderedMap<PathBuf> = pairs.into_iter().map(|(s, d)| (s, d.into())).collect();
        self.config.sync.groups.insert(key, pairs);
        self
    }

    pub fn exclude_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.sync.exclude_pattern = pattern.into();
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.sync.output_dir = dir.into();
        self
    }

    pub fn unit_timeout_secs(mut self, seconds: u64) -> Self {
        self.config.sync.unit_timeout_secs = Some(seconds);
        self
    }

    // --- notifier ---

    pub fn notifier_address(mut self, address: impl Into<String>) -> Self {
        self.config.notifier.address = address.into();
        self
    }

    pub fn sync_image(mut self, image: Value) -> Self {
        self.config.notifier.sync_image = image;
        self
    }

    pub fn hold_secs(mut self, seconds: u64) -> Self {
        self.config.notifier.hold_secs = seconds;
        self
    }

    pub fn request_timeout_secs(mut self, seconds: u64) -> Self {
        self.config.notifier.request_timeout_secs = seconds;
        self
    }

    // --- health ---

    pub fn host(mut self, name: impl Into<String>, address: impl Into<String>) -> Self {
        self.config.health.hosts.insert(name, address.into());
        self
    }

    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.config.health.max_attempts = attempts;
        self
    }

    pub fn repeat_count(mut self, count: u32) -> Self {
        self.config.health.repeat_count = count;
        self
    }

    pub fn ping_command(mut self, command: impl Into<String>, args: Vec<String>) -> Self {
        self.config.health.ping_command = command.into();
        self.config.health.ping_args = args;
        self
    }

    // --- alert ---

    pub fn alert_colors(mut self, text_color: Rgb, back_color: Rgb) -> Self {
        self.config.alert.text_color = text_color;
        self.config.alert.back_color = back_color;
        self
    }

    pub fn alert_scroll(mut self, scroll: bool) -> Self {
        self.config.alert.scroll = scroll;
        self
    }

    pub fn orientation(mut self, orientation: Value) -> Self {
        self.config.alert.orientation = orientation;
        self
    }

    // --- logging ---

    pub fn logging_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    // --- build ---

    /// Consume the builder and return the finished [`Config`].
    pub fn build(self) -> Config {
        self.config
    }

    /// Build and validate in one step. Returns `Err` with the list of
    /// validation errors if the configuration is invalid.
    pub fn build_validated(self) -> Result<Config, Vec<ValidationError>> {
        let config = self.build();
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(errors)
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
