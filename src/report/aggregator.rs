// src/report/aggregator.rs
use super::{HealthReport, ReportError};
use crate::health::classify;
use crate::monitor::MonitorState;
use crate::probe::ProbeExecutor;
use std::sync::Arc;
use tracing::{debug, info};

/// Runs one full pass over the target set: probe, classify, count, alert.
pub struct ReportAggregator {
    executor: ProbeExecutor,
    state: Arc<MonitorState>,
}

impl ReportAggregator {
    pub fn new(executor: ProbeExecutor, state: Arc<MonitorState>) -> Self {
        Self { executor, state }
    }

    /// Probe every target in construction order and assemble a report.
    /// Each probe updates the cumulative counters exactly once, and every
    /// non-healthy classification produces exactly one alert record before
    /// this returns. An empty target set is a configuration error, not a
    /// zero-percent report.
    pub async fn run_cycle(&self) -> Result<HealthReport, ReportError> {
        let targets = self.state.targets();
        if targets.is_empty() {
            return Err(ReportError::EmptyTargetSet);
        }

        let mut per_target = Vec::with_capacity(targets.len());
        let mut healthy_count = 0;

        for target in targets {
            let outcome = self.executor.probe(target).await;
            let classification = classify(&outcome);

            self.state.stats().record_probe(classification.state);

            if classification.state.is_healthy() {
                healthy_count += 1;
                debug!("Target {} is healthy", target);
            } else {
                self.state.alerts().record(target, &classification).await;
            }

            per_target.push((target.clone(), classification));
        }

        let total_count = per_target.len();
        let health_percentage = round2(100.0 * healthy_count as f64 / total_count as f64);

        info!(
            "Check cycle complete: {}/{} healthy ({:.1}%)",
            healthy_count, total_count, health_percentage
        );

        Ok(HealthReport {
            per_target,
            healthy_count,
            total_count,
            health_percentage,
        })
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
