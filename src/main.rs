// src/main.rs
use anyhow::Result;
use production_monitor::config;
use production_monitor::export;
use production_monitor::monitor::Monitor;
use production_monitor::transport::HttpTransport;
use std::sync::Arc;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("production_monitor=debug".parse()?)
                .add_directive("reqwest=info".parse()?),
        )
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.yaml".to_string());

    info!("Loading configuration from: {}", config_path);
    let config = config::load_config(&config_path).await?;

    let transport = Arc::new(HttpTransport::new());
    let monitor = Arc::new(Monitor::new(&config, transport));

    // Stop the loop on Ctrl+C or SIGTERM
    {
        let monitor = monitor.clone();
        tokio::spawn(async move {
            shutdown_signal().await;
            monitor.shutdown();
        });
    }

    let final_stats = monitor.start().await?;

    info!(
        "Final statistics: {} cycles, {} alerts, {} checks ({} healthy / {} errors) since {}",
        final_stats.cycles_completed,
        final_stats.alerts_sent,
        final_stats.checks.total_checks,
        final_stats.checks.healthy_checks,
        final_stats.checks.error_checks,
        final_stats.checks.start_time.format("%Y-%m-%d %H:%M:%S")
    );

    if let Some(path) = &config.export_path {
        export::export_report(monitor.state(), path).await?;
    }

    Ok(())
}

// Graceful shutdown handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
