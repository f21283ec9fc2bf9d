// src/alert/mod.rs
mod log;

pub use log::{AlertLog, AlertRecord};
