//! Health monitor: one probe per configured host
//!
//! Hosts are probed concurrently. The report lists unresponsive hosts in
//! configuration order regardless of which probe finished first.

use futures_util::future::join_all;
use hatsync_core::config::OrderedMap;
use hatsync_core::domain::{HealthReport, ProbeResult};
use tracing::{info, warn};

use crate::prober::Prober;

/// Classifies every configured host
pub struct HealthMonitor {
    prober: Prober,
}

impl HealthMonitor {
    pub fn new(prober: Prober) -> Self {
        Self { prober }
    }

    /// Probes every host and returns the names of the unresponsive ones
    ///
    /// # Arguments
    /// * `hosts` - Host name -> address, in configuration order
    /// * `max_attempts` - Attempts per host before it is declared unresponsive
    #[tracing::instrument(skip_all, fields(hosts = hosts.len(), max_attempts = max_attempts))]
    pub async fn check(&self, hosts: &OrderedMap<String>, max_attempts: u32) -> HealthReport {
        let probes = hosts.iter().map(|(name, address)| async move {
            let result = self.prober.probe(address, max_attempts).await;
            (name, result)
        });

        // join_all yields results in input order.
        let results = join_all(probes).await;

        let report: HealthReport = results
            .into_iter()
            .filter(|(_, result)| *result == ProbeResult::Unresponsive)
            .map(|(name, _)| name.to_string())
            .collect();

        if report.is_empty() {
            info!("All hosts responsive");
        } else {
            warn!(unresponsive = ?report.names(), "Hosts unresponsive");
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use hatsync_core::ports::IReachabilityCheck;

    use super::*;

    /// Fixed exit code per address; records every call
    struct FixedCheck {
        codes: HashMap<&'static str, i32>,
        delays: HashMap<&'static str, Duration>,
        calls: Mutex<Vec<String>>,
    }

    impl FixedCheck {
        fn new(codes: &[(&'static str, i32)]) -> Self {
            Self {
                codes: codes.iter().copied().collect(),
                delays: HashMap::new(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls_to(&self, address: &str) -> usize {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|a| a.as_str() == address)
                .count()
        }
    }

    #[async_trait::async_trait]
    impl IReachabilityCheck for FixedCheck {
        async fn check(&self, address: &str) -> anyhow::Result<i32> {
            self.calls.lock().unwrap().push(address.to_string());
            if let Some(delay) = self.delays.get(address) {
                tokio::time::sleep(*delay).await;
            }
            Ok(self.codes.get(address).copied().unwrap_or(1))
        }
    }

    fn hosts(pairs: &[(&str, &str)]) -> OrderedMap<String> {
        pairs
            .iter()
            .map(|(name, addr)| (name.to_string(), addr.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_reports_only_unresponsive_hosts() {
        let check = Arc::new(FixedCheck::new(&[("10.0.0.1", 0), ("10.0.0.3", 0)]));
        let monitor = HealthMonitor::new(Prober::new(check.clone()));

        let report = monitor
            .check(
                &hosts(&[("nas", "10.0.0.1"), ("printer", "10.0.0.2"), ("pi", "10.0.0.3")]),
                3,
            )
            .await;

        assert_eq!(report.names(), &["printer".to_string()]);
        assert_eq!(check.calls_to("10.0.0.1"), 1);
        assert_eq!(check.calls_to("10.0.0.2"), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_report_keeps_configuration_order() {
        let mut check = FixedCheck::new(&[]);
        // The first host answers last.
        check.delays.insert("10.0.0.1", Duration::from_secs(5));
        let monitor = HealthMonitor::new(Prober::new(Arc::new(check)));

        let report = monitor
            .check(&hosts(&[("alpha", "10.0.0.1"), ("beta", "10.0.0.2")]), 1)
            .await;

        assert_eq!(report.names(), &["alpha".to_string(), "beta".to_string()]);
    }

    #[tokio::test]
    async fn test_no_hosts_is_empty_report() {
        let monitor = HealthMonitor::new(Prober::new(Arc::new(FixedCheck::new(&[]))));
        let report = monitor.check(&OrderedMap::new(), 3).await;
        assert!(report.is_empty());
    }
}
