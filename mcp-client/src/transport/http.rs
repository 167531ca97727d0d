//! HTTP transport: one POST per request against a single MCP endpoint.
//!
//! Every request carries `Content-Type: application/json`, an `Accept` header
//! listing both `application/json` and `text/event-stream`, and then every
//! header of the [`ServerProfile`] verbatim (a profile header with the same
//! name replaces the default). Only single JSON documents are read back.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use url::Url;

use super::{RawResponse, Transport, TransportInfo};
use crate::codec::preview;
use crate::config::ServerProfile;
use crate::error::{ConfigError, McpError, McpResult, StateError, TransportError};

/// Media types accepted from the server.
pub const ACCEPT_MEDIA_TYPES: &str = "application/json, text/event-stream";

/// reqwest-backed [`Transport`] bound to one [`ServerProfile`].
#[derive(Debug)]
pub struct HttpTransport {
    /// Shared HTTP client; `None` once closed
    client: RwLock<Option<Client>>,
    /// Profile the transport was built from
    profile: ServerProfile,
    /// Validated endpoint URL
    url: Url,
    /// Headers sent with every request
    headers: HeaderMap,
    /// Per-request timeout, if any
    timeout: Option<Duration>,
    closed: AtomicBool,
    requests_sent: AtomicU64,
    responses_received: AtomicU64,
    errors: AtomicU64,
}

impl HttpTransport {
    /// Create a transport for `profile`.
    ///
    /// Fails with [`ConfigError::InvalidValue`] when the URL is not an
    /// absolute http(s) URL, and with [`TransportError::InvalidRequest`] when
    /// a profile header is not a valid HTTP header.
    pub fn new(profile: ServerProfile, timeout: Option<Duration>) -> McpResult<Self> {
        let url = parse_endpoint(&profile.url)?;
        let headers = build_headers(&profile)?;
        let client = Client::builder()
            .build()
            .map_err(|e| TransportError::from_reqwest(&profile.url, &e))?;

        debug!(
            "Created HTTP transport for {} with {} profile header(s)",
            url,
            profile.headers.len()
        );

        Ok(Self {
            client: RwLock::new(Some(client)),
            profile,
            url,
            headers,
            timeout,
            closed: AtomicBool::new(false),
            requests_sent: AtomicU64::new(0),
            responses_received: AtomicU64::new(0),
            errors: AtomicU64::new(0),
        })
    }

    /// Profile this transport was built from.
    pub fn profile(&self) -> &ServerProfile {
        &self.profile
    }

    /// Per-request timeout, if one was configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn transport_error(&self, err: &reqwest::Error) -> McpError {
        self.errors.fetch_add(1, Ordering::Relaxed);
        McpError::Transport(TransportError::from_reqwest(&self.profile.url, err))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, body: String) -> McpResult<RawResponse> {
        // The lock is only held long enough to clone the shared client.
        let client = match self.client.read().await.as_ref() {
            Some(client) => client.clone(),
            None => return Err(StateError::Closed.into()),
        };

        debug!("Sending MCP request to {}: {}", self.url, preview(&body));

        let mut request = client
            .post(self.url.clone())
            .headers(self.headers.clone())
            .body(body);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        self.requests_sent.fetch_add(1, Ordering::Relaxed);
        let response = request.send().await.map_err(|e| self.transport_error(&e))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| self.transport_error(&e))?;
        self.responses_received.fetch_add(1, Ordering::Relaxed);

        if !(200..300).contains(&status) {
            warn!("MCP endpoint {} answered with HTTP {}", self.url, status);
        }
        debug!("Received MCP response ({}): {}", status, preview(&body));

        Ok(RawResponse { status, body })
    }

    async fn close(&self) -> bool {
        let released = self.client.write().await.take().is_some();
        self.closed.store(true, Ordering::Release);
        if released {
            info!("HTTP transport for {} closed", self.url);
        }
        released
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    fn endpoint(&self) -> &str {
        &self.profile.url
    }

    fn info(&self) -> TransportInfo {
        TransportInfo {
            transport_type: "http".to_string(),
            endpoint: self.profile.url.clone(),
            closed: self.is_closed(),
            requests_sent: self.requests_sent.load(Ordering::Relaxed),
            responses_received: self.responses_received.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
        }
    }
}

fn parse_endpoint(raw: &str) -> McpResult<Url> {
    let invalid = |reason: String| ConfigError::InvalidValue {
        parameter: "url".to_string(),
        value: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme '{other}', expected http or https")).into()),
    }
}

fn build_headers(profile: &ServerProfile) -> McpResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_MEDIA_TYPES));

    for (name, value) in &profile.headers {
        let invalid = |reason: String| TransportError::InvalidRequest {
            url: profile.url.clone(),
            reason: format!("header '{name}': {reason}"),
        };
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(e.to_string()))?;
        let header_value = HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
        headers.insert(header_name, header_value);
    }

    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_default_headers() {
        let headers = build_headers(&ServerProfile::new("http://localhost:8080/mcp")).unwrap();
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert_eq!(headers[ACCEPT], ACCEPT_MEDIA_TYPES);
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn test_profile_headers_applied_verbatim() {
        let profile = ServerProfile::new("http://localhost:8080/mcp")
            .with_header("Authorization", "Bearer secret")
            .with_header("X-Tenant", "acme");
        let headers = build_headers(&profile).unwrap();

        assert_eq!(headers["authorization"], "Bearer secret");
        assert_eq!(headers["x-tenant"], "acme");
    }

    #[test]
    fn test_invalid_header_is_rejected() {
        let profile =
            ServerProfile::new("http://localhost:8080/mcp").with_header("Bad Header", "x");
        let err = HttpTransport::new(profile, None).unwrap_err();
        assert_matches!(err, McpError::Transport(TransportError::InvalidRequest { .. }));
    }

    #[test]
    fn test_invalid_urls_are_config_errors() {
        for url in ["not a url", "ftp://example.com/mcp", ""] {
            let err = HttpTransport::new(ServerProfile::new(url), None).unwrap_err();
            assert_matches!(
                err,
                McpError::Config(ConfigError::InvalidValue { ref parameter, .. }) if parameter == "url"
            );
        }
    }

    #[tokio::test]
    async fn test_close_is_idempotent_and_blocks_sends() {
        let transport =
            HttpTransport::new(ServerProfile::new("http://127.0.0.1:9/mcp"), None).unwrap();
        assert!(!transport.is_closed());

        assert!(transport.close().await);
        assert!(!transport.close().await);
        assert!(transport.is_closed());

        let err = transport.send("{}".to_string()).await.unwrap_err();
        assert_matches!(err, McpError::State(StateError::Closed));
        assert_eq!(transport.info().requests_sent, 0);
        assert!(transport.info().closed);
    }

    #[test]
    fn test_transport_accessors() {
        let transport = HttpTransport::new(
            ServerProfile::new("https://example.com/mcp"),
            Some(Duration::from_secs(5)),
        )
        .unwrap();
        assert_eq!(transport.endpoint(), "https://example.com/mcp");
        assert_eq!(transport.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(transport.info().transport_type, "http");
    }
}
