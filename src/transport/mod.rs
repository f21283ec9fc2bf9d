// src/transport/mod.rs
mod http;

#[cfg(test)]
pub(crate) mod mock;

pub use http::HttpTransport;

use async_trait::async_trait;
use std::time::Duration;
use url::Url;

/// Transport-level failure shapes. These are expected outcomes, converted to
/// data by the classifier, never propagated as crashes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("connection refused")]
    ConnectionRefused,

    #[error("transport failure: {0}")]
    Other(String),
}

#[derive(Debug, Clone, Copy)]
pub struct TransportResponse {
    pub status_code: u16,
    pub elapsed_ms: f64,
}

/// Injected HTTP capability: perform a GET with a hard timeout ceiling and
/// report the status code plus wall-clock latency, or a typed failure. The
/// monitor core has no opinion on TLS, redirects, or pooling.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn do_get(&self, url: &Url, timeout: Duration) -> Result<TransportResponse, TransportError>;
}
