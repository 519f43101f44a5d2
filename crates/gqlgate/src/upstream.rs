//! Upstream forwarding abstraction.
//!
//! Defines the [`Upstream`] trait the router forwards through and provides
//! the reqwest-backed [`HttpUpstream`] used in production. Tests substitute
//! their own recording mock.

use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::extract::Request;
use axum::http::HeaderName;
use axum::response::Response;

// ==============================================================================
// Errors
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("invalid upstream origin: {0}")]
    InvalidOrigin(String),

    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid upstream response: {0}")]
    InvalidResponse(String),
}

// ==============================================================================
// Forwarding Contract
// ==============================================================================

/// Minimal contract between the proxy and the origin it protects.
///
/// Implementations own connection management; the router hands over the
/// request exactly as received (the guard restores inspected bodies before
/// forwarding).
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Forward a request and return the origin's response.
    async fn forward(&self, request: Request) -> Result<Response, UpstreamError>;
}

// ==============================================================================
// HTTP Implementation
// ==============================================================================

/// Forwards requests to an HTTP(S) origin via a pooled reqwest client,
/// streaming bodies in both directions.
pub struct HttpUpstream {
    client: reqwest::Client,
    origin: String,
}

impl HttpUpstream {
    /// Create a forwarder for `origin`, which must be a bare
    /// `scheme://host[:port]` — the incoming request's path and query are
    /// appended verbatim.
    pub fn new(origin: &str) -> Result<Self, UpstreamError> {
        let url = reqwest::Url::parse(origin)
            .map_err(|e| UpstreamError::InvalidOrigin(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(UpstreamError::InvalidOrigin(format!(
                "unsupported scheme `{}`",
                url.scheme()
            )));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(32)
            .tcp_nodelay(true)
            .build()
            .expect("reqwest client builder uses valid static config");

        Ok(Self {
            client,
            origin: origin.trim_end_matches('/').to_owned(),
        })
    }

    /// Best-effort reachability probe used once at startup. Any HTTP
    /// response, whatever the status, counts as reachable.
    pub async fn probe(&self) -> Result<(), UpstreamError> {
        self.client.get(&self.origin).send().await?;
        Ok(())
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn forward(&self, request: Request) -> Result<Response, UpstreamError> {
        let (parts, body) = request.into_parts();
        let path_and_query = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");
        let url = format!("{}{}", self.origin, path_and_query);

        let mut headers = axum::http::HeaderMap::with_capacity(parts.headers.len());
        for (name, value) in &parts.headers {
            if skip_request_header(name) {
                continue;
            }
            headers.append(name, value.clone());
        }

        let response = self
            .client
            .request(parts.method, &url)
            .headers(headers)
            .body(reqwest::Body::wrap_stream(body.into_data_stream()))
            .send()
            .await?;

        let mut builder = axum::http::Response::builder().status(response.status());
        for (name, value) in response.headers() {
            if is_hop_by_hop(name) {
                continue;
            }
            builder = builder.header(name, value);
        }
        builder
            .body(Body::from_stream(response.bytes_stream()))
            .map_err(|e| UpstreamError::InvalidResponse(e.to_string()))
    }
}

// ==============================================================================
// Header Filtering
// ==============================================================================

/// Connection-scoped headers (RFC 9110 §7.6.1) that must not travel across
/// the proxy hop.
fn is_hop_by_hop(name: &HeaderName) -> bool {
    matches!(
        name.as_str(),
        "connection"
            | "keep-alive"
            | "proxy-authenticate"
            | "proxy-authorization"
            | "te"
            | "trailer"
            | "transfer-encoding"
            | "upgrade"
    )
}

/// Headers dropped from forwarded requests: hop-by-hop headers, plus `host`
/// (rewritten for the origin) and `content-length` (recomputed by the client
/// for buffered bodies, chunked for streamed ones).
fn skip_request_header(name: &HeaderName) -> bool {
    is_hop_by_hop(name) || matches!(name.as_str(), "host" | "content-length")
}
