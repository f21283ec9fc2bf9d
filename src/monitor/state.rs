// src/monitor/state.rs
use crate::alert::AlertLog;
use crate::probe::Target;
use crate::stats::CumulativeStats;

/// The single point of shared mutable state: the fixed target set, the
/// append-only alert history, and the lifetime counters. Created once at
/// startup and shared as `Arc<MonitorState>`; external readers only ever
/// see snapshots.
pub struct MonitorState {
    targets: Vec<Target>,
    alerts: AlertLog,
    stats: CumulativeStats,
}

impl MonitorState {
    pub fn new(targets: Vec<Target>) -> Self {
        Self {
            targets,
            alerts: AlertLog::new(),
            stats: CumulativeStats::new(),
        }
    }

    /// Targets in the order supplied at construction. Iteration order is
    /// what makes alert sequence numbers reproducible.
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn alerts(&self) -> &AlertLog {
        &self.alerts
    }

    pub fn stats(&self) -> &CumulativeStats {
        &self.stats
    }
}
