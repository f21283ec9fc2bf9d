// src/health/status.rs
use chrono::{DateTime, Utc};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthState {
    Healthy,
    Warning,
    Timeout,
    ConnectionError,
    UnexpectedError,
}

impl HealthState {
    /// `Healthy` is the unique passing state; everything else alerts.
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthState::Healthy)
    }

    pub fn label(&self) -> &'static str {
        match self {
            HealthState::Healthy => "HEALTHY",
            HealthState::Warning => "WARNING",
            HealthState::Timeout => "TIMEOUT",
            HealthState::ConnectionError => "CONNECTION ERROR",
            HealthState::UnexpectedError => "ERROR",
        }
    }
}

impl fmt::Display for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The verdict derived from one probe. `status_code` is 0 when the request
/// never produced an HTTP response.
#[derive(Debug, Clone)]
pub struct Classification {
    pub state: HealthState,
    pub response_time_ms: f64,
    pub status_code: u16,
    pub timestamp: DateTime<Utc>,
    pub error_detail: Option<String>,
}
