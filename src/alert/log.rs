// src/alert/log.rs
use crate::health::Classification;
use crate::probe::Target;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::warn;

/// One persisted notification of a non-healthy classification. Records are
/// never mutated or removed after creation.
#[derive(Debug, Clone)]
pub struct AlertRecord {
    pub sequence_number: u64,
    pub target: Target,
    pub classification: Classification,
    pub rendered_message: String,
}

/// Append-only alert history. Insertion order is chronological, and the
/// sequence counter always equals the log length.
pub struct AlertLog {
    records: RwLock<Vec<AlertRecord>>,
    sequence: AtomicU64,
}

impl AlertLog {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            sequence: AtomicU64::new(0),
        }
    }

    /// Record an alert for a failing classification. The first alert ever is
    /// numbered 1. Emitting the rendered message to the operator log is the
    /// presentation side effect; the record itself is what callers rely on.
    pub async fn record(&self, target: &Target, classification: &Classification) -> AlertRecord {
        let sequence_number = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;

        let rendered_message = render_alert(sequence_number, target, classification);
        warn!("{}", rendered_message);

        let record = AlertRecord {
            sequence_number,
            target: target.clone(),
            classification: classification.clone(),
            rendered_message,
        };

        self.records.write().await.push(record.clone());
        record
    }

    pub fn count(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }

    /// Copy-on-read view of the full history.
    pub async fn snapshot(&self) -> Vec<AlertRecord> {
        self.records.read().await.clone()
    }
}

impl Default for AlertLog {
    fn default() -> Self {
        Self::new()
    }
}

fn render_alert(sequence: u64, target: &Target, classification: &Classification) -> String {
    let error_detail = classification
        .error_detail
        .as_deref()
        .unwrap_or("Unknown error");

    format!(
        "PRODUCTION ALERT #{sequence}\n\
         Service: {target}\n\
         Time: {time}\n\
         Status: {status}\n\
         Response Time: {response_time}ms\n\
         Error: {error_detail}",
        time = classification.timestamp.format("%Y-%m-%d %H:%M:%S"),
        status = classification.state,
        response_time = classification.response_time_ms,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::HealthState;
    use chrono::Utc;

    fn warning(code: u16) -> Classification {
        Classification {
            state: HealthState::Warning,
            response_time_ms: 42.5,
            status_code: code,
            timestamp: Utc::now(),
            error_detail: Some(format!("HTTP Error: {code}")),
        }
    }

    #[tokio::test]
    async fn test_sequence_numbers_are_dense_from_one() {
        let log = AlertLog::new();
        let target: Target = "https://a.example/".parse().unwrap();

        for _ in 0..3 {
            log.record(&target, &warning(500)).await;
        }

        let records = log.snapshot().await;
        assert_eq!(log.count(), 3);
        assert_eq!(records.len(), 3);

        let sequence: Vec<u64> = records.iter().map(|r| r.sequence_number).collect();
        assert_eq!(sequence, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_rendered_message_embeds_alert_fields() {
        let log = AlertLog::new();
        let target: Target = "https://a.example/".parse().unwrap();

        let record = log.record(&target, &warning(503)).await;

        assert!(record.rendered_message.contains("PRODUCTION ALERT #1"));
        assert!(record.rendered_message.contains("https://a.example/"));
        assert!(record.rendered_message.contains("Status: WARNING"));
        assert!(record.rendered_message.contains("Response Time: 42.5ms"));
        assert!(record.rendered_message.contains("Error: HTTP Error: 503"));
    }

    #[tokio::test]
    async fn test_missing_detail_renders_unknown_error() {
        let log = AlertLog::new();
        let target: Target = "https://a.example/".parse().unwrap();

        let mut classification = warning(500);
        classification.error_detail = None;

        let record = log.record(&target, &classification).await;
        assert!(record.rendered_message.contains("Error: Unknown error"));
    }
}
