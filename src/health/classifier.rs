// src/health/classifier.rs
use super::{Classification, HealthState};
use crate::probe::ProbeOutcome;
use crate::transport::TransportError;
use chrono::Utc;

/// Map a raw probe outcome to a health verdict. Pure: no I/O, no shared
/// state; the timestamp is the only thing captured from the environment.
///
/// Measured response times are rounded to 2 decimal places; conventional
/// values (the timeout ceiling, 0 for failures without a measured latency)
/// stay exact.
pub fn classify(outcome: &ProbeOutcome) -> Classification {
    let timestamp = Utc::now();

    match (&outcome.status_code, &outcome.transport_error) {
        (Some(200), _) => Classification {
            state: HealthState::Healthy,
            response_time_ms: round2(outcome.elapsed_ms),
            status_code: 200,
            timestamp,
            error_detail: None,
        },
        (Some(code), _) => Classification {
            state: HealthState::Warning,
            response_time_ms: round2(outcome.elapsed_ms),
            status_code: *code,
            timestamp,
            error_detail: Some(format!("HTTP Error: {code}")),
        },
        (None, Some(TransportError::Timeout)) => Classification {
            state: HealthState::Timeout,
            // The executor already substituted the ceiling for elapsed_ms.
            response_time_ms: outcome.elapsed_ms,
            status_code: 0,
            timestamp,
            error_detail: Some(format!(
                "Request timed out after {} seconds",
                (outcome.elapsed_ms / 1000.0) as u64
            )),
        },
        (None, Some(TransportError::ConnectionRefused)) => Classification {
            state: HealthState::ConnectionError,
            response_time_ms: 0.0,
            status_code: 0,
            timestamp,
            error_detail: Some("Cannot connect to service - check network/DNS".to_string()),
        },
        (None, Some(TransportError::Other(msg))) => Classification {
            state: HealthState::UnexpectedError,
            response_time_ms: 0.0,
            status_code: 0,
            timestamp,
            error_detail: Some(format!("Unexpected error: {msg}")),
        },
        // A transport must yield a status or an error; treat the impossible
        // combination as an unexpected failure rather than panicking.
        (None, None) => Classification {
            state: HealthState::UnexpectedError,
            response_time_ms: 0.0,
            status_code: 0,
            timestamp,
            error_detail: Some("Unexpected error: probe returned neither status nor error".to_string()),
        },
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
