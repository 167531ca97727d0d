//! Core JSON-RPC 2.0 envelope structures for MCP communication.
//!
//! The client only ever sends requests and receives the matching response in
//! the body of the same HTTP exchange, so this module models exactly those two
//! envelopes plus the error object.
//!
//! # Examples
//!
//! ```rust
//! use mcp_client::messages::core::{JsonRpcRequest, JsonRpcResponse};
//! use serde_json::json;
//!
//! let request = JsonRpcRequest::new("1", "tools/call", Some(json!({"name": "echo"})));
//! assert!(request.has_params());
//!
//! let response = JsonRpcResponse::success("1", json!({"tools": []}));
//! assert!(response.is_success());
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// JSON-RPC protocol tag carried by every envelope.
pub const JSONRPC_VERSION: &str = "2.0";

/// A JSON object, the shape of every params bag and tool argument bag.
pub type JsonObject = serde_json::Map<String, Value>;

fn jsonrpc_version() -> String {
    JSONRPC_VERSION.to_string()
}

/// JSON-RPC 2.0 request message.
///
/// `params` is omitted from the wire form when absent, never sent as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// JSON-RPC version (always "2.0")
    #[serde(default = "jsonrpc_version")]
    pub jsonrpc: String,

    /// Correlation identifier, fresh per call
    pub id: String,

    /// Method name being invoked
    pub method: String,

    /// Parameters for the method
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Create a new JSON-RPC request with the given ID, method, and parameters.
    pub fn new(id: impl Into<String>, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: jsonrpc_version(),
            id: id.into(),
            method: method.into(),
            params,
        }
    }

    /// Create a request with a random UUID v4 as its correlation id.
    pub fn with_random_id(method: impl Into<String>, params: Option<Value>) -> Self {
        Self::new(Uuid::new_v4().to_string(), method, params)
    }

    /// Check if this request has parameters.
    pub fn has_params(&self) -> bool {
        self.params.is_some()
    }
}

/// JSON-RPC 2.0 response message.
///
/// Unknown fields are ignored. A usable response carries exactly one of
/// `result` and `error`; [`codec::decode_response`](crate::codec::decode_response)
/// rejects envelopes carrying both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// JSON-RPC version (defaults to "2.0" when the server omits it)
    #[serde(default = "jsonrpc_version")]
    pub jsonrpc: String,

    /// ID from the corresponding request, if the server echoed one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RequestId>,

    /// Success result (mutually exclusive with error)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    /// Error result (mutually exclusive with result)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Create a successful response with the given result.
    pub fn success(id: impl Into<RequestId>, result: Value) -> Self {
        Self {
            jsonrpc: jsonrpc_version(),
            id: Some(id.into()),
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response with the given error.
    pub fn error(id: impl Into<RequestId>, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: jsonrpc_version(),
            id: Some(id.into()),
            result: None,
            error: Some(error),
        }
    }

    /// Check if this response represents a success.
    pub fn is_success(&self) -> bool {
        self.result.is_some() && self.error.is_none()
    }

    /// Check if this response represents an error.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Whether the echoed id (if any) matches `request_id`.
    ///
    /// Servers that omit the id are treated as matching.
    pub fn matches_request(&self, request_id: &str) -> bool {
        match &self.id {
            None | Some(RequestId::Null) => true,
            Some(RequestId::String(id)) => id == request_id,
            Some(RequestId::Number(n)) => n.to_string() == request_id,
            Some(RequestId::Other(_)) => false,
        }
    }
}

/// JSON-RPC 2.0 error object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Numeric error code
    pub code: i32,

    /// Human-readable error message
    pub message: String,

    /// Additional error data (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    /// Create a new JSON-RPC error.
    pub fn new(code: i32, message: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            code,
            message: message.into(),
            data,
        }
    }

    /// Check if this is a standard JSON-RPC error (vs application-specific).
    pub fn is_standard_error(&self) -> bool {
        matches!(self.code, -32700..=-32600)
    }
}

impl std::fmt::Display for JsonRpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "JSON-RPC Error {}: {}", self.code, self.message)?;
        if let Some(data) = &self.data {
            write!(f, " ({data})")?;
        }
        Ok(())
    }
}

/// Request ID as echoed back by a server.
///
/// This client always sends string ids, but servers in the wild echo numbers
/// or `null`. Any other JSON value lands in [`RequestId::Other`] and never
/// fails decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    /// String identifier
    String(String),
    /// Numeric identifier
    Number(i64),
    /// Null identifier
    Null,
    /// Anything else: fractional or out-of-range numbers, objects, arrays
    Other(Value),
}

impl From<String> for RequestId {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<i64> for RequestId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Null => write!(f, "null"),
            Self::Other(value) => write!(f, "{value}"),
        }
    }
}
