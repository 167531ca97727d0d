//! Server profiles and the `mcpServers` configuration document.
//!
//! A configuration document names one or more servers:
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "local": { "url": "http://localhost:8080/mcp" },
//!     "prod":  { "url": "https://mcp.example.com/mcp",
//!                "headers": { "Authorization": "Bearer token" } }
//!   }
//! }
//! ```
//!
//! Resolution is purely local: nothing here touches the network.
//!
//! # Examples
//!
//! ```rust
//! use mcp_client::config::ServersConfig;
//!
//! let config = ServersConfig::from_json(
//!     r#"{"mcpServers": {"local": {"url": "http://localhost:8080/mcp"}}}"#,
//! )?;
//! assert_eq!(config.names(), vec!["local"]);
//! assert!(config.resolve("local")?.headers.is_empty());
//! # Ok::<(), mcp_client::McpError>(())
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, McpResult};
use crate::messages::JsonObject;

/// Connection settings for one server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerProfile {
    /// Absolute URL of the MCP endpoint
    pub url: String,

    /// Headers added verbatim to every request
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl ServerProfile {
    /// Create a profile without extra headers.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
        }
    }

    /// Add a header sent with every request.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServersDocument {
    mcp_servers: JsonObject,
}

/// Parsed `mcpServers` document: named profiles in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServersConfig {
    servers: Vec<(String, ServerProfile)>,
}

impl ServersConfig {
    /// Parse a configuration document from JSON text.
    pub fn from_json(text: &str) -> McpResult<Self> {
        Self::parse(text, "<inline>")
    }

    /// Load a configuration document from a file.
    pub fn from_file(path: impl AsRef<Path>) -> McpResult<Self> {
        let path = path.as_ref();
        let source_name = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: source_name.clone(),
            },
            _ => ConfigError::InvalidFormat {
                source_name: source_name.clone(),
                reason: e.to_string(),
            },
        })?;
        Self::parse(&content, &source_name)
    }

    fn parse(text: &str, source_name: &str) -> McpResult<Self> {
        let invalid = |reason: String| ConfigError::InvalidFormat {
            source_name: source_name.to_string(),
            reason,
        };

        let document: ServersDocument =
            serde_json::from_str(text).map_err(|e| invalid(e.to_string()))?;

        let mut servers = Vec::with_capacity(document.mcp_servers.len());
        for (name, value) in document.mcp_servers {
            let profile: ServerProfile = serde_json::from_value(value)
                .map_err(|e| invalid(format!("server '{name}': {e}")))?;
            servers.push((name, profile));
        }

        debug!("Loaded {} server profile(s) from {}", servers.len(), source_name);
        Ok(Self { servers })
    }

    /// Look up the profile registered under `name`.
    pub fn resolve(&self, name: &str) -> McpResult<&ServerProfile> {
        self.servers
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, profile)| profile)
            .ok_or_else(|| {
                ConfigError::ServerNotFound {
                    name: name.to_string(),
                }
                .into()
            })
    }

    /// Server names in document order.
    pub fn names(&self) -> Vec<&str> {
        self.servers.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Number of configured servers.
    pub fn len(&self) -> usize {
        self.servers.len()
    }

    /// Whether the document names no servers.
    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    /// Iterate over `(name, profile)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ServerProfile)> {
        self.servers
            .iter()
            .map(|(name, profile)| (name.as_str(), profile))
    }
}

/// Load `path` and return a copy of the profile named `name`.
pub fn resolve_profile(path: impl AsRef<Path>, name: &str) -> McpResult<ServerProfile> {
    ServersConfig::from_file(path)?.resolve(name).cloned()
}

/// Load `path` and return its server names in document order.
pub fn list_server_names(path: impl AsRef<Path>) -> McpResult<Vec<String>> {
    let config = ServersConfig::from_file(path)?;
    Ok(config.names().into_iter().map(str::to_string).collect())
}
