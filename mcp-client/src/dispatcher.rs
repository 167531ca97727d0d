//! Request dispatcher: one typed remote call per invocation.
//!
//! The dispatcher owns the request/response cycle for a single call: it
//! builds the envelope with a fresh correlation id, hands the encoded body to
//! the [`Transport`], decodes what comes back and turns it into either the
//! caller's result type or an [`McpError`].

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::codec::{self, preview};
use crate::error::{McpError, McpResult, ParseError, ProtocolError, StateError, TransportError};
use crate::messages::JsonRpcRequest;
use crate::transport::Transport;

/// Sends JSON-RPC requests over a shared transport.
#[derive(Clone)]
pub struct RequestDispatcher {
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for RequestDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestDispatcher")
            .field("endpoint", &self.transport.endpoint())
            .field("closed", &self.transport.is_closed())
            .finish()
    }
}

impl RequestDispatcher {
    /// Create a dispatcher on top of `transport`.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Transport this dispatcher sends through.
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Serialize typed request parameters into a params value.
    pub fn encode_params<P: Serialize>(&self, params: &P) -> McpResult<Value> {
        serde_json::to_value(params)
            .map_err(|e| self.invalid_request(format!("failed to encode params: {e}")))
    }

    fn invalid_request(&self, reason: String) -> McpError {
        TransportError::InvalidRequest {
            url: self.transport.endpoint().to_string(),
            reason,
        }
        .into()
    }

    /// Call `method` and decode its `result` into `T`.
    ///
    /// # Errors
    ///
    /// - [`StateError::Closed`] if the transport is closed (no I/O happens)
    /// - [`TransportError`](crate::error::TransportError) if the exchange fails
    /// - [`ParseError::MalformedResponse`] if the body is not a response envelope
    /// - [`ProtocolError::Rpc`] if the server answered with an error object
    /// - [`ProtocolError::MissingResult`] if it answered with neither
    /// - [`ParseError::ResultShape`] if the result does not decode into `T`
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Option<Value>,
    ) -> McpResult<T> {
        let result = self.call_raw(method, params).await?;
        decode_result(method, &result)
    }

    /// Call `method` and return its `result` undecoded.
    pub async fn call_raw(&self, method: &str, params: Option<Value>) -> McpResult<Value> {
        if self.transport.is_closed() {
            return Err(StateError::Closed.into());
        }

        let request = JsonRpcRequest::with_random_id(method, params);
        let body = codec::encode_request(&request).map_err(|e| {
            self.invalid_request(format!("failed to encode '{}' request: {e}", method))
        })?;
        debug!("-> {} [{}] {}", method, request.id, preview(&body));

        let raw = self.transport.send(body).await?;
        if !raw.is_success() {
            warn!("'{}' returned HTTP {}", method, raw.status);
        }

        let response = codec::decode_response(&raw.body)
            .map_err(|err| McpError::Parse(with_status(err, raw.status)))?;
        debug!("<- {} [{}] HTTP {}", method, request.id, raw.status);

        if !response.matches_request(&request.id) {
            warn!(
                "Response id {:?} does not match request id {} for '{}'",
                response.id, request.id, method
            );
        }

        if let Some(error) = response.error {
            return Err(ProtocolError::Rpc(error).into());
        }

        response.result.ok_or_else(|| {
            ProtocolError::MissingResult {
                method: method.to_string(),
            }
            .into()
        })
    }
}

fn with_status(err: ParseError, status: u16) -> ParseError {
    match err {
        ParseError::MalformedResponse {
            reason, preview, ..
        } => ParseError::MalformedResponse {
            status: Some(status),
            reason,
            preview,
        },
        other => other,
    }
}

fn decode_result<T: DeserializeOwned>(method: &str, result: &Value) -> McpResult<T> {
    T::deserialize(result).map_err(|e| {
        ParseError::ResultShape {
            method: method.to_string(),
            reason: e.to_string(),
            preview: preview(&result.to_string()),
        }
        .into()
    })
}
