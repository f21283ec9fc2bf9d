// src/transport/mock.rs
use super::{Transport, TransportError, TransportResponse};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// Deterministic transport for tests: each URL is scripted to a fixed
/// behavior. Unscripted URLs fail loudly so a test can't silently probe
/// the wrong target.
pub(crate) enum Script {
    Status(u16),
    Timeout,
    ConnectionRefused,
    Fail(&'static str),
}

pub(crate) struct ScriptedTransport {
    scripts: HashMap<String, Script>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self {
            scripts: HashMap::new(),
        }
    }

    pub(crate) fn script(mut self, url: &str, script: Script) -> Self {
        let url = Url::parse(url).expect("invalid scripted url");
        self.scripts.insert(url.to_string(), script);
        self
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn do_get(
        &self,
        url: &Url,
        _deadline: Duration,
    ) -> Result<TransportResponse, TransportError> {
        match self.scripts.get(url.as_str()) {
            Some(Script::Status(code)) => Ok(TransportResponse {
                status_code: *code,
                elapsed_ms: 12.3456,
            }),
            Some(Script::Timeout) => Err(TransportError::Timeout),
            Some(Script::ConnectionRefused) => Err(TransportError::ConnectionRefused),
            Some(Script::Fail(msg)) => Err(TransportError::Other((*msg).to_string())),
            None => panic!("no script for url {url}"),
        }
    }
}
