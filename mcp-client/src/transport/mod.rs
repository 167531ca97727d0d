//! Transport layer: one request body out, one raw response back.
//!
//! The client speaks to servers through the [`Transport`] trait. The only
//! network implementation is [`HttpTransport`], which performs one HTTP POST
//! per call; tests and embedders can plug in any other implementation through
//! [`McpClient::with_transport`](crate::McpClient::with_transport).
//!
//! # Examples
//!
//! ```rust,no_run
//! use mcp_client::config::ServerProfile;
//! use mcp_client::transport::{HttpTransport, Transport};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let profile = ServerProfile::new("http://localhost:8080/mcp")
//!         .with_header("Authorization", "Bearer token");
//!     let transport = HttpTransport::new(profile, None)?;
//!
//!     let raw = transport
//!         .send(r#"{"jsonrpc":"2.0","id":"1","method":"tools/list"}"#.to_string())
//!         .await?;
//!     println!("{} {}", raw.status, raw.body);
//!     Ok(())
//! }
//! ```

pub mod http;

pub use http::HttpTransport;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::McpResult;

/// Core transport trait for MCP communication.
///
/// A transport is bound to one endpoint for its whole life. It moves opaque
/// JSON text; encoding and decoding belong to the [`codec`](crate::codec).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request body and return the raw response.
    ///
    /// Fails with [`StateError::Closed`](crate::error::StateError::Closed)
    /// without any I/O once the transport has been closed.
    async fn send(&self, body: String) -> McpResult<RawResponse>;

    /// Release the underlying resources.
    ///
    /// Returns `true` only for the call that actually closed the transport.
    async fn close(&self) -> bool;

    /// Whether [`close`](Transport::close) has completed.
    fn is_closed(&self) -> bool;

    /// Endpoint this transport talks to, for logs and error messages.
    fn endpoint(&self) -> &str;

    /// Counters and metadata about this transport.
    fn info(&self) -> TransportInfo {
        TransportInfo::new("custom", self.endpoint())
    }
}

/// Status and body of one HTTP exchange, before any decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,

    /// Response body as text
    pub body: String,
}

impl RawResponse {
    /// Create a raw response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Snapshot of a transport's counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransportInfo {
    /// Kind of transport (`http`, or `custom` for embedder implementations)
    pub transport_type: String,

    /// Endpoint the transport talks to
    pub endpoint: String,

    /// Whether the transport has been closed
    pub closed: bool,

    /// Number of request bodies handed to the network
    pub requests_sent: u64,

    /// Number of responses received, whatever their status
    pub responses_received: u64,

    /// Number of exchanges that failed at the transport level
    pub errors: u64,
}

impl TransportInfo {
    /// Create an info snapshot with zeroed counters.
    pub fn new(transport_type: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            transport_type: transport_type.into(),
            endpoint: endpoint.into(),
            closed: false,
            requests_sent: 0,
            responses_received: 0,
            errors: 0,
        }
    }
}
