//! High-level MCP client.
//!
//! [`McpClient`] exposes one method per MCP operation. The handshake happens
//! lazily: the first operation on a fresh client performs `initialize`
//! (exactly once, even when many tasks call concurrently), and every later
//! operation goes straight to the server.
//!
//! The client is a cheap handle around shared state, so it can be cloned
//! into spawned tasks; all clones see the same session and the same close
//! flag.
//!
//! # Examples
//!
//! ```rust,no_run
//! use mcp_client::{McpClient, ServerProfile};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = McpClient::new(ServerProfile::new("http://localhost:8080/mcp"))?;
//!
//!     for tool in client.list_tools().await?.tools {
//!         println!("{}", tool.name);
//!     }
//!
//!     let mut args = serde_json::Map::new();
//!     args.insert("message".into(), "hello".into());
//!     let result = client.call_tool("echo", Some(args)).await?;
//!     println!("{}", result.text());
//!
//!     client.close().await;
//!     Ok(())
//! }
//! ```

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::config::{ServerProfile, ServersConfig};
use crate::dispatcher::RequestDispatcher;
use crate::error::{McpError, McpResult, StateError};
use crate::messages::{
    CallToolRequest, CallToolResponse, Implementation, InitializeResponse, JsonObject,
    ListPromptsResponse, ListResourcesResponse, ListToolsResponse, ReadResourceRequest,
    ReadResourceResponse, ServerCapabilities, ServerInfo, Tool,
};
use crate::session::Session;
use crate::transport::{HttpTransport, Transport, TransportInfo};

/// Name the client identifies as during the handshake by default.
pub const DEFAULT_CLIENT_NAME: &str = "mcp-client";

/// Configuration options for MCP client behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Identity sent as `clientInfo` in the handshake
    pub client_info: Implementation,

    /// Timeout for each HTTP exchange (default: none)
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            client_info: Implementation::new(DEFAULT_CLIENT_NAME, crate::VERSION),
            request_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Set the identity sent during the handshake.
    pub fn with_client_info(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.client_info = Implementation::new(name, version);
        self
    }

    /// Set a timeout for each HTTP exchange.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

struct ClientInner {
    dispatcher: RequestDispatcher,
    session: Session,
    config: ClientConfig,
}

/// Handle to one MCP server.
#[derive(Clone)]
pub struct McpClient {
    inner: Arc<ClientInner>,
}

impl std::fmt::Debug for McpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("McpClient")
            .field("endpoint", &self.endpoint())
            .field("ready", &self.is_ready())
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl McpClient {
    /// Create a client for `profile` with the default configuration.
    ///
    /// No network activity happens until the first operation.
    pub fn new(profile: ServerProfile) -> McpResult<Self> {
        Self::with_config(profile, ClientConfig::default())
    }

    /// Create a client for `profile` with a custom configuration.
    pub fn with_config(profile: ServerProfile, config: ClientConfig) -> McpResult<Self> {
        let transport = HttpTransport::new(profile, config.request_timeout)?;
        Ok(Self::with_transport(Arc::new(transport), config))
    }

    /// Create a client on top of an existing transport.
    pub fn with_transport(transport: Arc<dyn Transport>, config: ClientConfig) -> Self {
        debug!("Creating MCP client for {}", transport.endpoint());
        Self {
            inner: Arc::new(ClientInner {
                dispatcher: RequestDispatcher::new(transport),
                session: Session::new(config.client_info.clone()),
                config,
            }),
        }
    }

    /// Create a client for the server `name` of a configuration file.
    pub fn from_config_file(path: impl AsRef<Path>, name: &str) -> McpResult<Self> {
        let config = ServersConfig::from_file(path)?;
        Self::new(config.resolve(name)?.clone())
    }

    /// Create a client for the server `name` of a configuration document.
    pub fn from_config_json(text: &str, name: &str) -> McpResult<Self> {
        let config = ServersConfig::from_json(text)?;
        Self::new(config.resolve(name)?.clone())
    }

    /// Start building a client step by step.
    pub fn builder() -> McpClientBuilder {
        McpClientBuilder::new()
    }

    /// Perform the handshake if it has not happened yet.
    ///
    /// Calling this explicitly is optional; every other operation does it
    /// first. Once the session is ready the cached result is returned.
    pub async fn initialize(&self) -> McpResult<Arc<InitializeResponse>> {
        self.ensure_open()?;
        self.inner.session.initialize(&self.inner.dispatcher).await
    }

    /// List the tools the server offers.
    pub async fn list_tools(&self) -> McpResult<ListToolsResponse> {
        self.request("tools/list", None).await
    }

    /// Call the tool `name` with optional arguments.
    ///
    /// A tool that fails on its own terms still returns `Ok`; check
    /// [`CallToolResponse::is_error`].
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> McpResult<CallToolResponse> {
        let params = self.inner.dispatcher.encode_params(&CallToolRequest {
            name: name.to_string(),
            arguments,
        })?;
        self.request("tools/call", Some(params)).await
    }

    /// List the resources the server exposes.
    pub async fn list_resources(&self) -> McpResult<ListResourcesResponse> {
        self.request("resources/list", None).await
    }

    /// Read the resource at `uri`.
    pub async fn read_resource(&self, uri: &str) -> McpResult<ReadResourceResponse> {
        let params = self.inner.dispatcher.encode_params(&ReadResourceRequest {
            uri: uri.to_string(),
        })?;
        self.request("resources/read", Some(params)).await
    }

    /// List the prompt templates the server offers.
    pub async fn list_prompts(&self) -> McpResult<ListPromptsResponse> {
        self.request("prompts/list", None).await
    }

    /// Find a tool by name in a fresh tool listing.
    pub async fn find_tool(&self, name: &str) -> McpResult<Option<Tool>> {
        let tools = self.list_tools().await?;
        Ok(tools.tools.into_iter().find(|tool| tool.name == name))
    }

    /// Whether the server currently offers a tool called `name`.
    pub async fn tool_exists(&self, name: &str) -> McpResult<bool> {
        Ok(self.find_tool(name).await?.is_some())
    }

    /// Server identity, once the handshake has completed.
    pub fn server_info(&self) -> Option<ServerInfo> {
        self.inner.session.server_info()
    }

    /// Server capabilities, once the handshake has completed.
    pub fn capabilities(&self) -> Option<ServerCapabilities> {
        self.inner.session.capabilities()
    }

    /// Whether the handshake has completed.
    pub fn is_ready(&self) -> bool {
        self.inner.session.is_ready()
    }

    /// Close the client and release its transport.
    ///
    /// Idempotent: only the first call releases anything, and it returns
    /// `true`. Every operation afterwards fails with [`StateError::Closed`].
    pub async fn close(&self) -> bool {
        let released = self.inner.dispatcher.transport().close().await;
        if released {
            info!("MCP client for {} closed", self.endpoint());
        }
        released
    }

    /// Whether [`close`](McpClient::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.inner.dispatcher.transport().is_closed()
    }

    /// Endpoint the client talks to.
    pub fn endpoint(&self) -> &str {
        self.inner.dispatcher.transport().endpoint()
    }

    /// Configuration the client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Counters of the underlying transport.
    pub fn transport_info(&self) -> TransportInfo {
        self.inner.dispatcher.transport().info()
    }

    fn ensure_open(&self) -> McpResult<()> {
        if self.is_closed() {
            return Err(StateError::Closed.into());
        }
        Ok(())
    }

    async fn request<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        params: Option<serde_json::Value>,
    ) -> McpResult<T> {
        self.initialize().await?;
        self.inner.dispatcher.call(method, params).await
    }
}

/// Builder for creating MCP clients with custom configuration.
#[derive(Default)]
pub struct McpClientBuilder {
    profile: Option<ServerProfile>,
    transport: Option<Arc<dyn Transport>>,
    config: ClientConfig,
}

impl McpClientBuilder {
    /// Create a new client builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect over HTTP using `profile`.
    pub fn profile(mut self, profile: ServerProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Use a custom transport; takes precedence over a profile.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Set the client configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the identity sent during the handshake.
    pub fn client_info(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.config = self.config.with_client_info(name, version);
        self
    }

    /// Set request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = Some(timeout);
        self
    }

    /// Build the MCP client.
    pub fn build(self) -> McpResult<McpClient> {
        match (self.transport, self.profile) {
            (Some(transport), _) => Ok(McpClient::with_transport(transport, self.config)),
            (None, Some(profile)) => McpClient::with_config(profile, self.config),
            (None, None) => Err(McpError::Config(crate::error::ConfigError::InvalidValue {
                parameter: "profile".to_string(),
                value: "<none>".to_string(),
                reason: "a server profile or a transport is required".to_string(),
            })),
        }
    }
}
