// src/export/mod.rs
use crate::monitor::MonitorState;
use chrono::Utc;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write monitoring report to {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Serialize the alert history plus summary statistics as human-readable
/// text. Destination failures surface as `ExportError`; in-memory state is
/// never touched.
pub async fn export_report<P: AsRef<Path>>(
    state: &MonitorState,
    path: P,
) -> Result<(), ExportError> {
    let path = path.as_ref();
    let alerts = state.alerts().snapshot().await;
    let stats = state.stats().snapshot();

    let mut out = String::new();
    let _ = writeln!(out, "PRODUCTION MONITORING REPORT");
    let _ = writeln!(out, "{}", "=".repeat(50));
    let _ = writeln!(out, "Generated: {}", Utc::now().format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out, "Monitoring since: {}", stats.start_time.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out, "Total Alerts: {}", alerts.len());
    let _ = writeln!(out, "Total Checks: {}", stats.total_checks);
    let _ = writeln!(out);

    for alert in &alerts {
        let _ = writeln!(out, "{}", alert.rendered_message);
        let _ = writeln!(out, "{}", "-".repeat(50));
    }

    tokio::fs::write(path, out)
        .await
        .map_err(|source| ExportError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    info!("Report exported to {}", path.display());
    Ok(())
}
