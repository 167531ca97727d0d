//! Error types for MCP client operations.
//!
//! Every failure a caller can observe falls into one of five kinds, each with
//! its own strongly-typed enum so callers can match on the kind instead of
//! inspecting message text:
//!
//! - [`TransportError`]: the HTTP exchange itself failed (never retried here)
//! - [`ParseError`]: the response body or its `result` could not be decoded
//! - [`ProtocolError`]: a well-formed response signalled failure
//! - [`ConfigError`]: configuration documents or profiles are unusable
//! - [`StateError`]: the client was used after [`close`](crate::McpClient::close)
//!
//! All error types are `Clone` so that one failed handshake can be reported to
//! every caller that was waiting on it.

use thiserror::Error;

use crate::messages::JsonRpcError;

/// JSON-RPC code reported for bodies that cannot be decoded.
pub const PARSE_ERROR_CODE: i32 = -32700;

/// The main error type for all MCP client operations.
///
/// # Examples
///
/// ```rust
/// use mcp_client::error::{McpError, StateError};
///
/// let error = McpError::State(StateError::Closed);
/// assert_eq!(error.category(), "state");
/// ```
#[derive(Error, Debug, Clone)]
pub enum McpError {
    /// Network-level failure (connection refused, timeout, TLS, ...)
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Malformed response body or result shape mismatch
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Well-formed response explicitly signalling failure
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Missing or unusable configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Use of a client in the wrong lifecycle state
    #[error("State error: {0}")]
    State(#[from] StateError),
}

/// Failures of the underlying HTTP exchange.
#[derive(Error, Debug, Clone)]
#[allow(missing_docs)]
pub enum TransportError {
    /// The server could not be reached
    #[error("Failed to connect to {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    /// The request exceeded the configured transport timeout
    #[error("Request to {url} timed out: {reason}")]
    Timeout { url: String, reason: String },

    /// The request could not be built (invalid header name or value, ...)
    #[error("Invalid request for {url}: {reason}")]
    InvalidRequest { url: String, reason: String },

    /// Any other network failure, including failing to read the body
    #[error("Network error ({url}): {reason}")]
    NetworkError { url: String, reason: String },
}

/// Failures to decode what the server sent back.
///
/// Both variants carry a bounded preview of the offending text.
#[derive(Error, Debug, Clone)]
#[allow(missing_docs)]
pub enum ParseError {
    /// The body is not a decodable JSON-RPC response envelope
    #[error("Failed to parse response as JSON: {reason}. Response was: {preview}")]
    MalformedResponse {
        status: Option<u16>,
        reason: String,
        preview: String,
    },

    /// The `result` does not have the shape expected for `method`
    #[error("Unexpected result shape for '{method}': {reason}. Result was: {preview}")]
    ResultShape {
        method: String,
        reason: String,
        preview: String,
    },
}

/// Failures reported by a well-formed response.
#[derive(Error, Debug, Clone)]
pub enum ProtocolError {
    /// The response carried an `error` object, kept verbatim
    #[error("MCP Error [{}]: {}", .0.code, .0.message)]
    Rpc(JsonRpcError),

    /// The response carried neither `result` nor `error`
    #[error("MCP response to '{method}' has no result")]
    MissingResult {
        /// Method of the request that got the empty response
        method: String,
    },
}

/// Configuration errors.
#[derive(Error, Debug, Clone)]
#[allow(missing_docs)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// Configuration document could not be parsed
    #[error("Invalid configuration format in {source_name}: {reason}")]
    InvalidFormat { source_name: String, reason: String },

    /// Requested server profile is not in the document
    #[error("Server '{name}' not found in configuration")]
    ServerNotFound { name: String },

    /// A configuration value is invalid
    #[error("Invalid value for parameter '{parameter}': {value} - {reason}")]
    InvalidValue {
        parameter: String,
        value: String,
        reason: String,
    },
}

/// Lifecycle errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// The client was closed and no longer performs network I/O
    #[error("Client is closed")]
    Closed,
}

/// Convenience type alias for Results using McpError.
pub type McpResult<T> = Result<T, McpError>;

impl McpError {
    /// Get the error category for this error.
    ///
    /// This is useful for error reporting and metrics collection.
    pub fn category(&self) -> &'static str {
        match self {
            McpError::Transport(_) => "transport",
            McpError::Parse(_) => "parse",
            McpError::Protocol(_) => "protocol",
            McpError::Config(_) => "config",
            McpError::State(_) => "state",
        }
    }

    /// The JSON-RPC error object, if the server sent one.
    pub fn rpc_error(&self) -> Option<&JsonRpcError> {
        match self {
            McpError::Protocol(ProtocolError::Rpc(error)) => Some(error),
            _ => None,
        }
    }

    /// Numeric JSON-RPC code associated with this error, if any.
    ///
    /// Parse failures report `-32700`; server errors report the server's code.
    pub fn code(&self) -> Option<i32> {
        match self {
            McpError::Parse(err) => Some(err.code()),
            McpError::Protocol(err) => err.code(),
            _ => None,
        }
    }
}

impl ParseError {
    /// JSON-RPC code for parse failures (`-32700`).
    pub fn code(&self) -> i32 {
        PARSE_ERROR_CODE
    }

    /// Bounded preview of the text that failed to decode.
    pub fn preview(&self) -> &str {
        match self {
            ParseError::MalformedResponse { preview, .. } => preview,
            ParseError::ResultShape { preview, .. } => preview,
        }
    }
}

impl ProtocolError {
    /// Server-provided error code, if the response carried an error object.
    pub fn code(&self) -> Option<i32> {
        match self {
            ProtocolError::Rpc(error) => Some(error.code),
            ProtocolError::MissingResult { .. } => None,
        }
    }
}

impl TransportError {
    /// Map a reqwest failure for `url` onto the transport taxonomy.
    pub fn from_reqwest(url: &str, err: &reqwest::Error) -> Self {
        let url = url.to_string();
        let reason = err.to_string();
        if err.is_timeout() {
            TransportError::Timeout { url, reason }
        } else if err.is_connect() {
            TransportError::ConnectionFailed { url, reason }
        } else if err.is_builder() {
            TransportError::InvalidRequest { url, reason }
        } else {
            TransportError::NetworkError { url, reason }
        }
    }
}

impl From<reqwest::Error> for McpError {
    fn from(err: reqwest::Error) -> Self {
        let url = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "<unknown>".to_string());
        McpError::Transport(TransportError::from_reqwest(&url, &err))
    }
}

impl From<url::ParseError> for McpError {
    fn from(err: url::ParseError) -> Self {
        McpError::Config(ConfigError::InvalidValue {
            parameter: "url".to_string(),
            value: err.to_string(),
            reason: "Invalid URL format".to_string(),
        })
    }
}
