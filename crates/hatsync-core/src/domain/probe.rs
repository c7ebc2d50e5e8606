//! Liveness classification of monitored hosts

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default number of probe attempts before a host is declared unresponsive
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Terminal classification of one host after a bounded-retry probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeResult {
    /// At least one attempt succeeded
    Responsive,
    /// Every attempt failed
    Unresponsive,
}

impl ProbeResult {
    pub fn is_responsive(&self) -> bool {
        matches!(self, ProbeResult::Responsive)
    }
}

impl fmt::Display for ProbeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProbeResult::Responsive => "responsive",
            ProbeResult::Unresponsive => "unresponsive",
        };
        write!(f, "{}", s)
    }
}

/// Names of the hosts classified unresponsive in one health-check run
///
/// Behaves as a set (a name is recorded once) but remembers insertion order
/// so alerts scroll across the display in configuration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    unresponsive: Vec<String>,
}

impl HealthReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `name` as unresponsive; returns false if it was already present
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.unresponsive.push(name);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.unresponsive.iter().any(|n| n == name)
    }

    pub fn is_empty(&self) -> bool {
        self.unresponsive.is_empty()
    }

    pub fn len(&self) -> usize {
        self.unresponsive.len()
    }

    /// Unresponsive host names in configuration order
    pub fn names(&self) -> &[String] {
        &self.unresponsive
    }
}

impl FromIterator<String> for HealthReport {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut report = HealthReport::new();
        for name in iter {
            report.insert(name);
        }
        report
    }
}
