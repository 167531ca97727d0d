//! Scripted in-memory transport used by the unit tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::{McpError, McpResult, StateError};
use crate::messages::{JsonRpcError, JsonRpcRequest};
use crate::transport::{RawResponse, Transport};

type Handler = dyn Fn(&JsonRpcRequest) -> Reply + Send + Sync;

/// What the scripted server answers to one request.
pub(crate) enum Reply {
    Raw(RawResponse),
    Fail(McpError),
}

impl Reply {
    pub(crate) fn raw(status: u16, body: String) -> Self {
        Reply::Raw(RawResponse::new(status, body))
    }

    pub(crate) fn result(request: &JsonRpcRequest, result: Value) -> Self {
        Self::raw(
            200,
            json!({"jsonrpc": "2.0", "id": request.id, "result": result}).to_string(),
        )
    }

    pub(crate) fn error(request: &JsonRpcRequest, error: JsonRpcError) -> Self {
        Self::raw(
            200,
            json!({"jsonrpc": "2.0", "id": request.id, "error": error}).to_string(),
        )
    }
}

/// Transport that records every request and answers through a handler.
pub(crate) struct ScriptedTransport {
    handler: Box<Handler>,
    sent: Mutex<Vec<JsonRpcRequest>>,
    delay: Option<Duration>,
    closed: AtomicBool,
}

impl ScriptedTransport {
    pub(crate) fn new(handler: impl Fn(&JsonRpcRequest) -> Reply + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self::build(handler, None))
    }

    /// Like [`ScriptedTransport::new`], but every exchange takes `delay`.
    pub(crate) fn delayed(
        delay: Duration,
        handler: impl Fn(&JsonRpcRequest) -> Reply + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self::build(handler, Some(delay)))
    }

    /// A well-behaved server exposing two tools, one resource and one prompt.
    pub(crate) fn server() -> Arc<Self> {
        Self::new(server_reply)
    }

    fn build(
        handler: impl Fn(&JsonRpcRequest) -> Reply + Send + Sync + 'static,
        delay: Option<Duration>,
    ) -> Self {
        Self {
            handler: Box::new(handler),
            sent: Mutex::new(Vec::new()),
            delay,
            closed: AtomicBool::new(false),
        }
    }

    pub(crate) fn requests(&self) -> Vec<JsonRpcRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub(crate) fn count(&self, method: &str) -> usize {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|request| request.method == method)
            .count()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, body: String) -> McpResult<RawResponse> {
        if self.is_closed() {
            return Err(StateError::Closed.into());
        }
        let request: JsonRpcRequest =
            serde_json::from_str(&body).expect("client sent an invalid request envelope");
        self.sent.lock().unwrap().push(request.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match (self.handler)(&request) {
            Reply::Raw(raw) => Ok(raw),
            Reply::Fail(err) => Err(err),
        }
    }

    async fn close(&self) -> bool {
        !self.closed.swap(true, Ordering::SeqCst)
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn endpoint(&self) -> &str {
        "memory://scripted"
    }
}

/// Answers of the server built by [`ScriptedTransport::server`].
pub(crate) fn server_reply(request: &JsonRpcRequest) -> Reply {
    let params = request.params.clone().unwrap_or(Value::Null);
    match request.method.as_str() {
        "initialize" => Reply::result(
            request,
            json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {"tools": {"listChanged": false}, "resources": {}},
                "serverInfo": {"name": "scripted", "version": "1.2.3"}
            }),
        ),
        "tools/list" => Reply::result(
            request,
            json!({"tools": [
                {
                    "name": "echo",
                    "description": "Echo a message",
                    "inputSchema": {
                        "type": "object",
                        "properties": {"message": {"type": "string"}},
                        "required": ["message"]
                    }
                },
                {"name": "fail", "inputSchema": {"type": "object"}}
            ]}),
        ),
        "tools/call" => match params["name"].as_str() {
            Some("echo") => {
                let message = params["arguments"]["message"].as_str().unwrap_or("");
                Reply::result(
                    request,
                    json!({"content": [{"type": "text", "text": message}], "isError": false}),
                )
            }
            Some("fail") => Reply::result(
                request,
                json!({"content": [{"type": "text", "text": "tool failed"}], "isError": true}),
            ),
            other => Reply::error(
                request,
                JsonRpcError::new(-32602, format!("Unknown tool: {}", other.unwrap_or("")), None),
            ),
        },
        "resources/list" => Reply::result(
            request,
            json!({"resources": [
                {"uri": "docs://readme", "name": "README", "mimeType": "text/markdown"}
            ]}),
        ),
        "resources/read" => match params["uri"].as_str() {
            Some("docs://readme") => Reply::result(
                request,
                json!({"contents": [
                    {"uri": "docs://readme", "mimeType": "text/markdown", "text": "# Hello"}
                ]}),
            ),
            _ => Reply::error(request, JsonRpcError::new(-32002, "Resource not found", None)),
        },
        "prompts/list" => Reply::result(
            request,
            json!({"prompts": [
                {"name": "greet", "arguments": [{"name": "who", "required": true}]}
            ]}),
        ),
        _ => Reply::error(request, JsonRpcError::new(-32601, "Method not found", None)),
    }
}
