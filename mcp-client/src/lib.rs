//! # MCP Client Library
//!
//! `mcp-client` talks to Model Context Protocol servers over HTTP. Every
//! request is one JSON-RPC envelope POSTed to the server's endpoint and the
//! response is the single JSON document that comes back.
//!
//! ## Features
//!
//! - **Lazy handshake**: `initialize` runs once per client, on first use,
//!   and concurrent first calls share it
//! - **Typed operations**: tools, resources and prompts with serde-decoded results
//! - **One error taxonomy**: transport, parse, protocol, config and state errors
//! - **Parallel invocation**: fan out tool calls and collect per-call outcomes
//! - **Config files**: resolve named servers from an `mcpServers` document
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mcp_client::McpClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = McpClient::from_config_file("mcp-config.json", "context7")?;
//!
//!     let info = client.initialize().await?;
//!     println!("Connected to: {} {}", info.server_info.name, info.server_info.version);
//!
//!     for tool in client.list_tools().await?.tools {
//!         println!("- {}", tool.name);
//!     }
//!
//!     client.close().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`codec`]: JSON-RPC envelope encoding and decoding
//! - [`messages`]: envelope and MCP payload types
//! - [`transport`]: the [`Transport`] trait and its HTTP implementation
//! - [`dispatcher`]: one typed request/response cycle
//! - [`session`]: the one-time handshake
//! - [`client`]: the [`McpClient`] facade
//! - [`parallel`]: concurrent tool calls
//! - [`config`]: server profiles and configuration documents
//! - [`error`]: the error taxonomy

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::uninlined_format_args)]

pub mod client;
pub mod codec;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod messages;
pub mod parallel;
pub mod session;
pub mod transport;

#[cfg(test)]
mod testing;

// Re-export commonly used types for convenience
pub use client::{ClientConfig, McpClient, McpClientBuilder};
pub use config::{list_server_names, resolve_profile, ServerProfile, ServersConfig};
pub use error::{McpError, McpResult};
pub use messages::{
    CallToolResponse, Implementation, InitializeResponse, JsonObject, ListPromptsResponse,
    ListResourcesResponse, ListToolsResponse, ReadResourceResponse, ServerCapabilities, ServerInfo,
    Tool, ToolContent,
};
pub use parallel::{call_many, BatchSummary};
pub use transport::{HttpTransport, RawResponse, Transport, TransportInfo};

/// Current version of the mcp-client library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// MCP protocol version requested during the handshake
pub const PROTOCOL_VERSION: &str = "2024-11-05";
