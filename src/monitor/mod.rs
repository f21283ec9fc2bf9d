// src/monitor/mod.rs
mod runner;
mod state;

pub use runner::{FinalStats, Monitor, MonitorEvent, MonitorPhase};
pub use state::MonitorState;
