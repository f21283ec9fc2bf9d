// src/health/mod.rs
mod classifier;
mod status;

pub use classifier::classify;
pub use status::{Classification, HealthState};
