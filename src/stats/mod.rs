// src/stats/mod.rs
use crate::health::HealthState;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};

/// Lifetime counters across all cycles. Every probe increments
/// `total_checks` and exactly one of `healthy_checks` / `error_checks`,
/// so `healthy + error == total` always holds. There is no reset.
pub struct CumulativeStats {
    total_checks: AtomicU64,
    healthy_checks: AtomicU64,
    error_checks: AtomicU64,
    start_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy)]
pub struct StatsSnapshot {
    pub total_checks: u64,
    pub healthy_checks: u64,
    pub error_checks: u64,
    pub start_time: DateTime<Utc>,
}

impl CumulativeStats {
    pub fn new() -> Self {
        Self {
            total_checks: AtomicU64::new(0),
            healthy_checks: AtomicU64::new(0),
            error_checks: AtomicU64::new(0),
            start_time: Utc::now(),
        }
    }

    pub fn record_probe(&self, state: HealthState) {
        self.total_checks.fetch_add(1, Ordering::SeqCst);
        if state.is_healthy() {
            self.healthy_checks.fetch_add(1, Ordering::SeqCst);
        } else {
            self.error_checks.fetch_add(1, Ordering::SeqCst);
        }
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            total_checks: self.total_checks.load(Ordering::SeqCst),
            healthy_checks: self.healthy_checks.load(Ordering::SeqCst),
            error_checks: self.error_checks.load(Ordering::SeqCst),
            start_time: self.start_time,
        }
    }
}

impl Default for CumulativeStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_partition_by_health() {
        let stats = CumulativeStats::new();

        stats.record_probe(HealthState::Healthy);
        stats.record_probe(HealthState::Warning);
        stats.record_probe(HealthState::Timeout);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.total_checks, 3);
        assert_eq!(snapshot.healthy_checks, 1);
        assert_eq!(snapshot.error_checks, 2);
        assert_eq!(
            snapshot.healthy_checks + snapshot.error_checks,
            snapshot.total_checks
        );
    }
}
