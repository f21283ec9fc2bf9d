// src/report/mod.rs
mod aggregator;

pub use aggregator::ReportAggregator;

use crate::health::Classification;
use crate::probe::Target;

/// Point-in-time snapshot of one full pass over the target set. Built fresh
/// each cycle; `per_target` preserves target-submission order.
#[derive(Debug, Clone)]
pub struct HealthReport {
    pub per_target: Vec<(Target, Classification)>,
    pub healthy_count: usize,
    pub total_count: usize,
    pub health_percentage: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("cannot run a check cycle over an empty target set")]
    EmptyTargetSet,
}
