// src/monitor/runner.rs
use super::MonitorState;
use crate::config::Config;
use crate::probe::ProbeExecutor;
use crate::report::{HealthReport, ReportAggregator, ReportError};
use crate::stats::StatsSnapshot;
use crate::transport::Transport;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, watch, RwLock};
use tokio::time::sleep;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorPhase {
    Idle,
    Running,
    Stopping,
    Stopped,
}

/// Observable events published by the monitoring loop. The cycle-level
/// critical signal is distinct from per-target alert records and is not
/// appended to the alert log.
#[derive(Debug, Clone)]
pub enum MonitorEvent {
    CycleCompleted { cycle: u64, report: HealthReport },
    CriticalHealth { cycle: u64, health_percentage: f64 },
}

/// Cumulative totals flushed when the loop stops.
#[derive(Debug, Clone)]
pub struct FinalStats {
    pub cycles_completed: u64,
    pub alerts_sent: u64,
    pub checks: StatsSnapshot,
}

/// Drives report cycles on a fixed interval until shut down. Cancellation
/// is cooperative: both suspension points (the probe phase and the
/// inter-cycle sleep) select against the shutdown channel, so a stop request
/// takes effect without waiting out a full interval or probe timeout.
pub struct Monitor {
    check_interval: Duration,
    critical_threshold: f64,
    aggregator: ReportAggregator,
    state: Arc<MonitorState>,
    phase: RwLock<MonitorPhase>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
    events_tx: broadcast::Sender<MonitorEvent>,
}

impl Monitor {
    pub fn new(config: &Config, transport: Arc<dyn Transport>) -> Self {
        let state = Arc::new(MonitorState::new(config.targets.clone()));
        let executor = ProbeExecutor::new(transport, config.probe_timeout());
        let aggregator = ReportAggregator::new(executor, state.clone());

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (events_tx, _) = broadcast::channel(64);

        Self {
            check_interval: config.check_interval(),
            critical_threshold: config.critical_threshold,
            aggregator,
            state,
            phase: RwLock::new(MonitorPhase::Idle),
            shutdown_tx,
            shutdown_rx,
            events_tx,
        }
    }

    pub fn state(&self) -> &Arc<MonitorState> {
        &self.state
    }

    pub async fn phase(&self) -> MonitorPhase {
        *self.phase.read().await
    }

    /// Subscribe to cycle completions and critical-health signals.
    pub fn subscribe(&self) -> broadcast::Receiver<MonitorEvent> {
        self.events_tx.subscribe()
    }

    /// Request a cooperative stop. Safe to call from any task.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    /// Run a single cycle on demand, outside the loop (e.g. for a dashboard
    /// that wants a fresh report).
    pub async fn run_cycle(&self) -> Result<HealthReport, ReportError> {
        self.aggregator.run_cycle().await
    }

    /// Run the monitoring loop until shut down. Returns the final cumulative
    /// statistics on a clean stop; a configuration error stops the loop
    /// instead of producing meaningless reports forever.
    pub async fn start(&self) -> Result<FinalStats, ReportError> {
        // A fresh start clears any stale stop request from a previous run.
        let _ = self.shutdown_tx.send(false);
        self.set_phase(MonitorPhase::Running).await;

        info!(
            "Starting production monitor: {} targets, check interval {:?}",
            self.state.targets().len(),
            self.check_interval
        );

        let mut shutdown_rx = self.shutdown_rx.clone();
        let mut cycles_completed: u64 = 0;

        loop {
            let result = tokio::select! {
                result = self.aggregator.run_cycle() => result,
                _ = shutdown_requested(&mut shutdown_rx) => break,
            };

            let report = match result {
                Ok(report) => report,
                Err(e) => {
                    error!("Stopping monitor: {e}");
                    self.set_phase(MonitorPhase::Stopped).await;
                    return Err(e);
                }
            };
            cycles_completed += 1;

            if report.health_percentage < self.critical_threshold {
                warn!(
                    "CRITICAL: only {:.1}% of services healthy, below the {:.1}% threshold",
                    report.health_percentage, self.critical_threshold
                );
                let _ = self.events_tx.send(MonitorEvent::CriticalHealth {
                    cycle: cycles_completed,
                    health_percentage: report.health_percentage,
                });
            }

            let _ = self.events_tx.send(MonitorEvent::CycleCompleted {
                cycle: cycles_completed,
                report,
            });

            tokio::select! {
                _ = sleep(self.check_interval) => {}
                _ = shutdown_requested(&mut shutdown_rx) => break,
            }
        }

        self.set_phase(MonitorPhase::Stopping).await;

        let final_stats = FinalStats {
            cycles_completed,
            alerts_sent: self.state.alerts().count(),
            checks: self.state.stats().snapshot(),
        };

        info!(
            "Monitoring stopped after {} cycles: {} alerts sent, {} checks ({} healthy, {} errors)",
            final_stats.cycles_completed,
            final_stats.alerts_sent,
            final_stats.checks.total_checks,
            final_stats.checks.healthy_checks,
            final_stats.checks.error_checks
        );

        self.set_phase(MonitorPhase::Stopped).await;
        Ok(final_stats)
    }

    async fn set_phase(&self, phase: MonitorPhase) {
        *self.phase.write().await = phase;
    }
}

/// Resolves once a stop has been requested. Never resolves otherwise, so it
/// is safe to race against work in a `select!`.
async fn shutdown_requested(rx: &mut watch::Receiver<bool>) {
    if *rx.borrow() {
        return;
    }

    while rx.changed().await.is_ok() {
        if *rx.borrow() {
            return;
        }
    }

    // Sender dropped without ever signaling.
    std::future::pending::<()>().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::Target;
    use crate::transport::mock::{Script, ScriptedTransport};

    fn config(urls: &[&str], interval_secs: u64) -> Config {
        Config {
            targets: urls.iter().map(|u| u.parse::<Target>().unwrap()).collect(),
            check_interval_secs: interval_secs,
            critical_threshold: 50.0,
            probe_timeout_secs: 10,
            export_path: None,
        }
    }

    #[tokio::test]
    async fn test_loop_stops_promptly_during_inter_cycle_sleep() {
        let transport = ScriptedTransport::new().script("https://a.example/", Script::Status(200));
        // An hour-long interval: the loop must not wait it out.
        let monitor = Arc::new(Monitor::new(&config(&["https://a.example/"], 3600), Arc::new(transport)));

        let runner = {
            let monitor = monitor.clone();
            tokio::spawn(async move { monitor.start().await })
        };

        tokio::time::sleep(Duration::from_millis(200)).await;
        monitor.shutdown();

        let final_stats = tokio::time::timeout(Duration::from_secs(5), runner)
            .await
            .expect("loop did not stop promptly")
            .unwrap()
            .unwrap();

        assert_eq!(final_stats.cycles_completed, 1);
        assert_eq!(final_stats.checks.total_checks, 1);
        assert_eq!(final_stats.alerts_sent, 0);
        assert_eq!(monitor.phase().await, MonitorPhase::Stopped);
    }

    #[tokio::test]
    async fn test_unhealthy_cycle_emits_critical_event() {
        let transport = ScriptedTransport::new()
            .script("https://a.example/", Script::Status(200))
            .script("https://b.example/", Script::Status(500))
            .script("https://c.example/", Script::Timeout);
        let monitor = Arc::new(Monitor::new(
            &config(
                &["https://a.example/", "https://b.example/", "https://c.example/"],
                3600,
            ),
            Arc::new(transport),
        ));

        let mut events = monitor.subscribe();
        let runner = {
            let monitor = monitor.clone();
            tokio::spawn(async move { monitor.start().await })
        };

        // 33.33% healthy is below the 50% threshold: critical fires first,
        // then the cycle completion.
        let first = tokio::time::timeout(Duration::from_secs(5), events.recv())
            .await
            .unwrap()
            .unwrap();
        match first {
            MonitorEvent::CriticalHealth {
                cycle,
                health_percentage,
            } => {
                assert_eq!(cycle, 1);
                assert_eq!(health_percentage, 33.33);
            }
            other => panic!("expected critical event, got {other:?}"),
        }

        let second = tokio::time::timeout(Duration::from_secs(5), events.recv())
            .await
            .unwrap()
            .unwrap();
        match second {
            MonitorEvent::CycleCompleted { report, .. } => {
                assert_eq!(report.healthy_count, 1);
                assert_eq!(report.total_count, 3);
            }
            other => panic!("expected cycle completion, got {other:?}"),
        }

        monitor.shutdown();
        let final_stats = runner.await.unwrap().unwrap();
        assert_eq!(final_stats.alerts_sent, 2);
        assert_eq!(final_stats.checks.total_checks, 3);
    }

    #[tokio::test]
    async fn test_healthy_cycle_above_threshold_is_not_critical() {
        // 3 of 5 healthy = 60%, above the 50% threshold.
        let transport = ScriptedTransport::new()
            .script("https://a.example/", Script::Status(200))
            .script("https://b.example/", Script::Status(200))
            .script("https://c.example/", Script::Status(200))
            .script("https://d.example/", Script::Status(500))
            .script("https://e.example/", Script::ConnectionRefused);
        let monitor = Arc::new(Monitor::new(
            &config(
                &[
                    "https://a.example/",
                    "https://b.example/",
                    "https://c.example/",
                    "https://d.example/",
                    "https://e.example/",
                ],
                3600,
            ),
            Arc::new(transport),
        ));

        let mut events = monitor.subscribe();
        let runner = {
            let monitor = monitor.clone();
            tokio::spawn(async move { monitor.start().await })
        };

        let first = tokio::time::timeout(Duration::from_secs(5), events.recv())
            .await
            .unwrap()
            .unwrap();
        match first {
            MonitorEvent::CycleCompleted { report, .. } => {
                assert_eq!(report.health_percentage, 60.0);
            }
            other => panic!("expected cycle completion without critical, got {other:?}"),
        }

        monitor.shutdown();
        runner.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_empty_target_set_stops_the_loop() {
        let monitor = Monitor::new(&config(&[], 3600), Arc::new(ScriptedTransport::new()));

        let result = monitor.start().await;

        assert!(matches!(result, Err(ReportError::EmptyTargetSet)));
        assert_eq!(monitor.phase().await, MonitorPhase::Stopped);
    }

    #[tokio::test]
    async fn test_on_demand_cycle_bypasses_the_loop() {
        let transport = ScriptedTransport::new().script("https://a.example/", Script::Status(200));
        let monitor = Monitor::new(&config(&["https://a.example/"], 3600), Arc::new(transport));

        let report = monitor.run_cycle().await.unwrap();

        assert_eq!(report.health_percentage, 100.0);
        assert_eq!(monitor.phase().await, MonitorPhase::Idle);
        assert_eq!(monitor.state().stats().snapshot().total_checks, 1);
    }
}
