// src/transport/http.rs
use super::{Transport, TransportError, TransportResponse};
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use url::Url;

/// Real transport backed by a shared reqwest client. The per-probe deadline
/// is enforced here with `tokio::time::timeout` rather than on the client,
/// so the ceiling can vary per call.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        let client = Client::builder()
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn do_get(
        &self,
        url: &Url,
        deadline: Duration,
    ) -> Result<TransportResponse, TransportError> {
        let start = Instant::now();

        let result = timeout(deadline, self.client.get(url.as_str()).send()).await;

        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        match result {
            Ok(Ok(response)) => Ok(TransportResponse {
                status_code: response.status().as_u16(),
                elapsed_ms,
            }),
            Ok(Err(e)) if e.is_timeout() => Err(TransportError::Timeout),
            Ok(Err(e)) if e.is_connect() => Err(TransportError::ConnectionRefused),
            Ok(Err(e)) => Err(TransportError::Other(e.to_string())),
            Err(_) => Err(TransportError::Timeout),
        }
    }
}
