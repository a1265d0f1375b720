//! HTTP transport capability.
//!
//! [`SkillsClient`](crate::SkillsClient) never talks to the network directly;
//! it hands a fully built [`TransportRequest`] to a [`Transport`] and gets
//! back a [`TransportResponse`] whose body has already been read to the end.
//! Buffering inside the transport means the underlying connection is
//! released before the client inspects the status, whichever branch it then
//! takes.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use tracing::debug;
use url::Url;

use crate::error::{Result, SkillsClientError};

/// Timeout applied by the default transport.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

// ---------------------------------------------------------------------------
// Request / response
// ---------------------------------------------------------------------------

/// A request ready to be put on the wire.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// Client operation that produced this request, for error context.
    pub operation: &'static str,
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    /// Serialized JSON payload, if the operation sends one.
    pub body: Option<Vec<u8>>,
}

impl TransportRequest {
    /// Look up a header value as a string.  Names are case-insensitive.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// A response whose body has been fully consumed.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// The body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

// ---------------------------------------------------------------------------
// Capability trait
// ---------------------------------------------------------------------------

/// Sends one request and returns the complete response.
///
/// Implementations must read the whole body before returning and must
/// report send or read failures as [`SkillsClientError::Transport`] or
/// [`SkillsClientError::Timeout`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse>;
}

// ---------------------------------------------------------------------------
// reqwest implementation
// ---------------------------------------------------------------------------

/// Default [`Transport`] backed by a [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
    /// Timeout the client was built with, if known.
    timeout: Option<Duration>,
}

impl ReqwestTransport {
    /// Build a transport whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SkillsClientError::Config {
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            timeout: Some(timeout),
        })
    }

    /// Wrap a pre-configured client.  Its timeout policy is used as is.
    pub fn from_client(http: reqwest::Client) -> Self {
        Self {
            http,
            timeout: None,
        }
    }

    fn map_error(&self, operation: &'static str, err: reqwest::Error) -> SkillsClientError {
        match self.timeout {
            Some(timeout) if err.is_timeout() => SkillsClientError::Timeout {
                operation,
                seconds: timeout.as_secs(),
            },
            _ => SkillsClientError::Transport {
                operation,
                reason: err.to_string(),
            },
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        let TransportRequest {
            operation,
            method,
            url,
            headers,
            body,
        } = request;

        let mut builder = self.http.request(method, url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| self.map_error(operation, e))?;
        let status = response.status();

        // `bytes` takes the response by value, so the connection goes back
        // to the pool (or is closed) whether or not the read succeeds.
        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_error(operation, e))?;

        debug!(operation, status = status.as_u16(), len = body.len(), "response received");

        Ok(TransportResponse {
            status,
            body: body.to_vec(),
        })
    }
}
