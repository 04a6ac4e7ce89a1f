//! Outbound HTTP used to talk to remote peers.
//!
//! [`PeerTransport`] is the seam between the coordinator and the network.
//! Timeouts are not its concern: the probe and the query client wrap every
//! call in `tokio::time::timeout`, so any implementation fails fast the
//! same way.

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::header::CONTENT_TYPE;
use hyper::{Method, Request, Uri};
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use std::time::Duration;
use thiserror::Error;
use tracing::trace;

pub const HEALTH_PATH: &str = "/health";
pub const QUERY_PATH: &str = "/query";

#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    pub body: Bytes,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    #[error("invalid peer URL '{0}'")]
    InvalidUri(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("failed to read response body: {0}")]
    Body(String),
}

#[async_trait]
pub trait PeerTransport: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpReply, TransportError>;

    async fn post_json(&self, url: &str, body: Bytes) -> Result<HttpReply, TransportError>;
}

/// `<address>/path`, tolerating a trailing slash on the address.
pub fn peer_url(peer_address: &str, path: &str) -> String {
    format!("{}{}", peer_address.trim_end_matches('/'), path)
}

pub struct HyperTransport {
    client: Client<HttpConnector, Full<Bytes>>,
}

impl HyperTransport {
    pub fn new(connect_timeout: Duration) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_nodelay(true);
        connector.set_connect_timeout(Some(connect_timeout));

        let client = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(Duration::from_secs(30))
            .build(connector);

        Self { client }
    }

    async fn send(&self, req: Request<Full<Bytes>>) -> Result<HttpReply, TransportError> {
        trace!(target: "lake_peer::transport", method = %req.method(), uri = %req.uri(), "Sending request");
        let res = self
            .client
            .request(req)
            .await
            .map_err(|e| TransportError::Connect(e.to_string()))?;

        let status = res.status().as_u16();
        let body = res
            .into_body()
            .collect()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?
            .to_bytes();

        Ok(HttpReply { status, body })
    }
}

#[async_trait]
impl PeerTransport for HyperTransport {
    async fn get(&self, url: &str) -> Result<HttpReply, TransportError> {
        let req = Request::builder()
            .method(Method::GET)
            .uri(parse_uri(url)?)
            .body(Full::new(Bytes::new()))
            .map_err(|e| TransportError::InvalidUri(format!("{url}: {e}")))?;
        self.send(req).await
    }

    async fn post_json(&self, url: &str, body: Bytes) -> Result<HttpReply, TransportError> {
        let req = Request::builder()
            .method(Method::POST)
            .uri(parse_uri(url)?)
            .header(CONTENT_TYPE, "application/json")
            .body(Full::new(body))
            .map_err(|e| TransportError::InvalidUri(format!("{url}: {e}")))?;
        self.send(req).await
    }
}

/// Only absolute `http://` URLs are accepted; the connector speaks plain
/// HTTP/1.1.
fn parse_uri(url: &str) -> Result<Uri, TransportError> {
    let uri: Uri = url
        .parse()
        .map_err(|_| TransportError::InvalidUri(url.to_string()))?;
    if uri.scheme_str() != Some("http") || uri.authority().is_none() {
        return Err(TransportError::InvalidUri(url.to_string()));
    }
    Ok(uri)
}
