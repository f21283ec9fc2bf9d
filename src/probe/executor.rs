// src/probe/executor.rs
use super::Target;
use crate::transport::{Transport, TransportError};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Raw result of one physical check, before classification. Errors are data
/// here, not control flow: `probe` always returns a value.
#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    pub status_code: Option<u16>,
    pub elapsed_ms: f64,
    pub transport_error: Option<TransportError>,
}

pub struct ProbeExecutor {
    transport: Arc<dyn Transport>,
    timeout: Duration,
}

impl ProbeExecutor {
    pub fn new(transport: Arc<dyn Transport>, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Issue one GET against the target. Timed-out probes report the
    /// configured ceiling as their elapsed time; other failures report the
    /// measured duration of the attempt.
    pub async fn probe(&self, target: &Target) -> ProbeOutcome {
        let start = Instant::now();

        let result = self.transport.do_get(target.url(), self.timeout).await;

        let measured_ms = start.elapsed().as_secs_f64() * 1000.0;

        let outcome = match result {
            Ok(response) => ProbeOutcome {
                status_code: Some(response.status_code),
                elapsed_ms: response.elapsed_ms,
                transport_error: None,
            },
            Err(TransportError::Timeout) => ProbeOutcome {
                status_code: None,
                elapsed_ms: self.timeout.as_millis() as f64,
                transport_error: Some(TransportError::Timeout),
            },
            Err(e) => ProbeOutcome {
                status_code: None,
                elapsed_ms: measured_ms,
                transport_error: Some(e),
            },
        };

        debug!(
            url = %target,
            status = ?outcome.status_code,
            elapsed_ms = outcome.elapsed_ms,
            "probe complete"
        );

        outcome
    }
}
