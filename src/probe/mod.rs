// src/probe/mod.rs
mod executor;
mod target;

pub use executor::{ProbeExecutor, ProbeOutcome};
pub use target::Target;
