// src/lib.rs
pub mod config;
pub mod transport;
pub mod probe;
pub mod health;
pub mod alert;
pub mod stats;
pub mod report;
pub mod monitor;
pub mod export;
