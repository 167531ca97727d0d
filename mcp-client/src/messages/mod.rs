//! MCP message types and JSON-RPC structures.
//!
//! All message types derive serde with the camelCase field names used on the
//! wire. Optional fields are omitted when absent and unknown fields sent by a
//! server are ignored, so newer servers keep working with this client.
//!
//! # Message Categories
//!
//! - **Core Messages**: JSON-RPC request/response envelopes
//! - **Initialization**: Protocol version negotiation and capability discovery
//! - **Tools**: Tool discovery and execution
//! - **Resources**: Resource listing and reading
//! - **Prompts**: Prompt template discovery
//!
//! # Examples
//!
//! ```rust
//! use mcp_client::messages::{InitializeRequest, JsonRpcRequest};
//!
//! let init_request = InitializeRequest::basic("my-client", "0.1.0");
//! let request = JsonRpcRequest::new(
//!     "1",
//!     "initialize",
//!     Some(serde_json::to_value(init_request).unwrap()),
//! );
//! assert_eq!(request.method, "initialize");
//! ```

pub mod core;
pub mod initialization;
pub mod prompts;
pub mod resources;
pub mod tools;

pub use self::core::*;
pub use initialization::*;
pub use prompts::{ListPromptsResponse, Prompt, PromptArgument};
pub use resources::{
    ListResourcesResponse, ReadResourceRequest, ReadResourceResponse, Resource, ResourceContents,
};
pub use tools::{
    CallToolRequest, CallToolResponse, ContentKind, ListToolsResponse, Tool, ToolContent,
};

use serde::{Deserialize, Serialize};

/// MCP protocol version identifier.
///
/// The client always requests [`ProtocolVersion::V2024_11_05`]; the server may
/// answer with any version string, which lands in [`ProtocolVersion::Custom`]
/// when it is not one of the known ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProtocolVersion {
    /// MCP Protocol version 2024-11-05
    #[serde(rename = "2024-11-05")]
    V2024_11_05,

    /// MCP Protocol version 2025-03-26
    #[serde(rename = "2025-03-26")]
    V2025_03_26,

    /// Any other version string reported by a server
    #[serde(untagged)]
    Custom(String),
}

impl ProtocolVersion {
    /// Get the string representation of the protocol version.
    pub fn as_str(&self) -> &str {
        match self {
            Self::V2024_11_05 => "2024-11-05",
            Self::V2025_03_26 => "2025-03-26",
            Self::Custom(version) => version,
        }
    }

    /// Check if this version is one this client knows about.
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::V2024_11_05 | Self::V2025_03_26)
    }
}

impl Default for ProtocolVersion {
    fn default() -> Self {
        Self::V2024_11_05
    }
}

impl std::fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Capabilities declared by this client during the handshake.
///
/// The client declares nothing, and servers reject `null` here, so this
/// always serializes as `{}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ClientCapabilities {}

/// Capabilities announced by the server in its initialize result.
///
/// Every sub-capability is optional; absence means the server did not
/// announce it. Keys this client does not know are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ServerCapabilities {
    /// Server can send log messages; its flags are not interpreted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<JsonObject>,

    /// Server provides prompt templates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompts: Option<PromptCapabilities>,

    /// Server provides readable resources
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceCapabilities>,

    /// Server provides callable tools
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolCapabilities>,
}

impl ServerCapabilities {
    /// Whether the server announced the tools capability.
    pub fn supports_tools(&self) -> bool {
        self.tools.is_some()
    }

    /// Whether the server announced the resources capability.
    pub fn supports_resources(&self) -> bool {
        self.resources.is_some()
    }

    /// Whether the server announced the prompts capability.
    pub fn supports_prompts(&self) -> bool {
        self.prompts.is_some()
    }

    /// Whether the server announced the logging capability.
    pub fn supports_logging(&self) -> bool {
        self.logging.is_some()
    }
}

/// Tool-related capabilities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ToolCapabilities {
    /// Whether the server notifies when its tool list changes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_changed: Option<bool>,
}

/// Resource-related capabilities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ResourceCapabilities {
    /// Whether the server supports subscribing to resource changes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscribe: Option<bool>,

    /// Whether the server notifies when its resource list changes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_changed: Option<bool>,
}

/// Prompt-related capabilities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PromptCapabilities {
    /// Whether the server notifies when its prompt list changes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_changed: Option<bool>,
}

/// Name and version of a client or server implementation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Implementation {
    /// Name of the implementation (e.g., "mcp-client")
    pub name: String,

    /// Version of the implementation (e.g., "0.1.0")
    pub version: String,
}

impl Implementation {
    /// Create a new implementation info structure.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Identity reported by the server during the handshake.
pub type ServerInfo = Implementation;
