//! MCP initialization and protocol negotiation message types.
//!
//! The handshake is a single `initialize` request:
//! 1. Client sends its protocol version, (empty) capabilities and identity
//! 2. Server responds with the negotiated version, its capabilities and identity
//!
//! # Examples
//!
//! ```rust
//! use mcp_client::messages::{InitializeRequest, ProtocolVersion};
//!
//! let init_request = InitializeRequest::basic("mcp-client", "0.1.0");
//! assert_eq!(init_request.protocol_version, ProtocolVersion::V2024_11_05);
//! ```

use super::{ClientCapabilities, Implementation, ProtocolVersion, ServerCapabilities};
use serde::{Deserialize, Serialize};

/// Client-to-server initialization request parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeRequest {
    /// Protocol version requested by the client
    pub protocol_version: ProtocolVersion,

    /// Capabilities offered by the client
    pub capabilities: ClientCapabilities,

    /// Information about the client implementation
    pub client_info: Implementation,
}

impl InitializeRequest {
    /// Create a new initialization request.
    pub fn new(protocol_version: ProtocolVersion, client_info: Implementation) -> Self {
        Self {
            protocol_version,
            capabilities: ClientCapabilities::default(),
            client_info,
        }
    }

    /// Create a request for the default protocol version.
    pub fn basic(client_name: impl Into<String>, client_version: impl Into<String>) -> Self {
        Self::new(
            ProtocolVersion::default(),
            Implementation::new(client_name, client_version),
        )
    }
}

/// Server-to-client initialization result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResponse {
    /// Protocol version that will be used for the session
    pub protocol_version: ProtocolVersion,

    /// Capabilities offered by the server
    #[serde(default)]
    pub capabilities: ServerCapabilities,

    /// Information about the server implementation
    pub server_info: Implementation,

    /// Optional usage instructions from the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}
