use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::peer::{HttpReply, PeerTransport, TransportError};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: &'static str,
    pub url: String,
    pub body: Option<String>,
    pub at: Instant,
}

#[derive(Clone)]
struct Route {
    reply: Result<HttpReply, TransportError>,
    delay: Option<Duration>,
}

/// Scripted [`PeerTransport`]: replies are registered per `METHOD url`, every
/// call is recorded, and unknown URLs fail like a refused connection.
pub struct MockTransport {
    routes: Mutex<HashMap<String, Route>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            routes: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn route(self, method: &str, url: &str, reply: Result<HttpReply, TransportError>) -> Self {
        self.routes
            .lock()
            .insert(format!("{method} {url}"), Route { reply, delay: None });
        self
    }

    pub fn on_get(self, url: &str, status: u16, body: &str) -> Self {
        self.route("GET", url, Ok(HttpReply::new(status, body.to_string())))
    }

    pub fn on_post(self, url: &str, status: u16, body: &str) -> Self {
        self.route("POST", url, Ok(HttpReply::new(status, body.to_string())))
    }

    pub fn on_get_error(self, url: &str, error: TransportError) -> Self {
        self.route("GET", url, Err(error))
    }

    pub fn on_post_error(self, url: &str, error: TransportError) -> Self {
        self.route("POST", url, Err(error))
    }

    /// A healthy peer at `address` answering `/query` with `body`.
    pub fn healthy_peer(self, address: &str, query_body: &str) -> Self {
        self.on_get(&format!("{address}/health"), 200, r#"{"status":"healthy"}"#)
            .on_post(&format!("{address}/query"), 200, query_body)
    }

    /// Delays the reply registered for `METHOD url`.
    pub fn delayed(self, method: &str, url: &str, delay: Duration) -> Self {
        if let Some(route) = self.routes.lock().get_mut(&format!("{method} {url}")) {
            route.delay = Some(delay);
        }
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn urls(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .map(|c| format!("{} {}", c.method, c.url))
            .collect()
    }

    async fn respond(
        &self,
        method: &'static str,
        url: &str,
        body: Option<String>,
    ) -> Result<HttpReply, TransportError> {
        self.calls.lock().push(RecordedCall {
            method,
            url: url.to_string(),
            body,
            at: Instant::now(),
        });
        let route = self.routes.lock().get(&format!("{method} {url}")).cloned();
        match route {
            Some(route) => {
                if let Some(delay) = route.delay {
                    tokio::time::sleep(delay).await;
                }
                route.reply
            }
            None => Err(TransportError::Connect("connection refused".to_string())),
        }
    }
}

#[async_trait]
impl PeerTransport for MockTransport {
    async fn get(&self, url: &str) -> Result<HttpReply, TransportError> {
        self.respond("GET", url, None).await
    }

    async fn post_json(&self, url: &str, body: Bytes) -> Result<HttpReply, TransportError> {
        let body = String::from_utf8_lossy(&body).into_owned();
        self.respond("POST", url, Some(body)).await
    }
}
