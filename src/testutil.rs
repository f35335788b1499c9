// Test doubles shared by the unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;
use tokio::sync::Notify;

use crate::error::{GuideError, Result};
use crate::github::Transport;

enum StubResponse {
    Body(String),
    Status(u16),
}

/// Transport answering from a fixed URL table and counting requests.
#[derive(Default)]
pub struct StubTransport {
    responses: HashMap<String, StubResponse>,
    gates: HashMap<String, Arc<Notify>>,
    hits: Mutex<HashMap<String, usize>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, body: &str) -> Self {
        self.responses
            .insert(url.to_string(), StubResponse::Body(body.to_string()));
        self
    }

    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.responses
            .insert(url.to_string(), StubResponse::Status(status));
        self
    }

    /// Hold responses for `url` until the returned gate is notified.
    pub fn gated(mut self, url: &str) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.gates.insert(url.to_string(), gate.clone());
        (self, gate)
    }

    pub fn hits(&self, url: &str) -> usize {
        self.hits.lock().unwrap().get(url).copied().unwrap_or(0)
    }
}

impl Transport for StubTransport {
    fn get_text<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            *self.hits.lock().unwrap().entry(url.to_string()).or_default() += 1;

            if let Some(gate) = self.gates.get(url) {
                gate.notified().await;
            }

            match self.responses.get(url) {
                Some(StubResponse::Body(body)) => Ok(body.clone()),
                Some(StubResponse::Status(status)) => Err(GuideError::Status {
                    status: *status,
                    url: url.to_string(),
                }),
                None => Err(GuideError::NotFound(url.to_string())),
            }
        })
    }
}
