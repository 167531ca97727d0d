//! Wire codec for JSON-RPC envelopes.
//!
//! Encoding reports the raw serde error and leaves mapping to the caller;
//! decoding turns any
//! body that is not a usable response envelope into a
//! [`ParseError::MalformedResponse`] carrying a bounded preview of the text.

use serde_json::Value;

use crate::error::ParseError;
use crate::messages::{JsonRpcRequest, JsonRpcResponse};

/// Maximum number of characters of a body kept in error previews and logs.
pub const PREVIEW_LIMIT: usize = 200;

/// Serialize a request envelope to its JSON text.
///
/// `jsonrpc` is always present and `params` is omitted when absent.
pub fn encode_request(request: &JsonRpcRequest) -> serde_json::Result<String> {
    serde_json::to_string(request)
}

/// Decode a response envelope from raw body text.
///
/// Unknown fields and surrounding whitespace are tolerated. A top level that
/// is not an object, or an envelope carrying both `result` and `error`, is
/// rejected.
pub fn decode_response(text: &str) -> Result<JsonRpcResponse, ParseError> {
    let malformed = |reason: String| ParseError::MalformedResponse {
        status: None,
        reason,
        preview: preview(text),
    };

    let value: Value = serde_json::from_str(text).map_err(|e| malformed(e.to_string()))?;
    if !value.is_object() {
        return Err(malformed(format!(
            "expected a JSON object, found {}",
            json_kind(&value)
        )));
    }

    let response: JsonRpcResponse =
        serde_json::from_value(value).map_err(|e| malformed(e.to_string()))?;
    if response.result.is_some() && response.error.is_some() {
        return Err(malformed(
            "response carries both 'result' and 'error'".to_string(),
        ));
    }
    Ok(response)
}

/// Truncate `text` to at most [`PREVIEW_LIMIT`] characters.
///
/// Cuts on a char boundary and appends `…` when anything was dropped.
pub fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_LIMIT) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
