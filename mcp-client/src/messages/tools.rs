//! Tool-related message types for MCP tool discovery and execution.
//!
//! This module provides types for:
//! - Tool discovery (`tools/list`)
//! - Tool execution (`tools/call`) and its content-bearing result

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::JsonObject;

/// Response containing the list of available tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListToolsResponse {
    /// List of available tools
    pub tools: Vec<Tool>,

    /// Optional cursor for next page of results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// Tool definition as advertised by a server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    /// Unique name of the tool
    pub name: String,

    /// Human-readable description of what the tool does
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// JSON Schema for the tool's input parameters
    pub input_schema: Value,
}

impl Tool {
    /// Create a new tool definition with an empty object schema.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            input_schema: Value::Object(JsonObject::new()),
        }
    }

    /// Set the description for this tool.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the input schema for this tool.
    pub fn with_input_schema(mut self, schema: Value) -> Self {
        self.input_schema = schema;
        self
    }

    /// Names listed under the schema's `required` array, in schema order.
    pub fn required_arguments(&self) -> Vec<&str> {
        self.input_schema
            .get("required")
            .and_then(Value::as_array)
            .map(|required| required.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

/// Parameters of a `tools/call` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallToolRequest {
    /// Name of the tool to call
    pub name: String,

    /// Arguments to pass to the tool
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<JsonObject>,
}

/// Result of a tool call.
///
/// A tool can fail without the RPC failing: that is reported through
/// `is_error` with the failure description in `content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallToolResponse {
    /// Content produced by the tool, in order
    pub content: Vec<ToolContent>,

    /// Whether the tool reported an error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl CallToolResponse {
    /// Whether the tool flagged this result as an error.
    pub fn is_error(&self) -> bool {
        self.is_error == Some(true)
    }

    /// All text parts of the content, joined by a blank line.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|content| content.text.as_deref())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// One piece of tool output.
///
/// The wire shape always carries every optional field; `content_type` says
/// which of them are meaningful (see [`ToolContent::kind`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolContent {
    /// Content type tag (`text`, `image`, `resource`, ...)
    #[serde(rename = "type")]
    pub content_type: String,

    /// Text payload for text-bearing content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Base64 payload for binary-bearing content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,

    /// MIME type of the binary payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// Typed view of [`ToolContent::content_type`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentKind<'a> {
    /// Text content, carried in `text`
    Text(&'a str),
    /// Binary image content, carried in `data` + `mime_type`
    Image {
        /// Base64 encoded image data
        data: &'a str,
        /// MIME type, if the server sent one
        mime_type: Option<&'a str>,
    },
    /// Embedded resource content
    Resource,
    /// A type this client does not interpret, or a tag missing its payload
    Other(&'a str),
}

impl ToolContent {
    /// Create text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content_type: "text".to_string(),
            text: Some(text.into()),
            data: None,
            mime_type: None,
        }
    }

    /// Create image content.
    pub fn image(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            content_type: "image".to_string(),
            text: None,
            data: Some(data.into()),
            mime_type: Some(mime_type.into()),
        }
    }

    /// Interpret the content according to its type tag.
    pub fn kind(&self) -> ContentKind<'_> {
        match (self.content_type.as_str(), &self.text, &self.data) {
            ("text", Some(text), _) => ContentKind::Text(text),
            ("image", _, Some(data)) => ContentKind::Image {
                data,
                mime_type: self.mime_type.as_deref(),
            },
            ("resource", _, _) => ContentKind::Resource,
            (other, _, _) => ContentKind::Other(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_creation() {
        let tool = Tool::new("calculator")
            .with_description("A simple calculator tool")
            .with_input_schema(json!({
                "type": "object",
                "properties": {
                    "expression": {"type": "string"}
                },
                "required": ["expression"]
            }));

        assert_eq!(tool.name, "calculator");
        assert_eq!(tool.description.as_deref(), Some("A simple calculator tool"));
        assert_eq!(tool.required_arguments(), vec!["expression"]);
    }

    #[test]
    fn test_tool_deserialization_with_camel_case() {
        let json_str = r#"{
            "name": "echo",
            "inputSchema": {"type": "object"},
            "annotations": {"readOnlyHint": true}
        }"#;

        let tool: Tool = serde_json::from_str(json_str).unwrap();
        assert_eq!(tool.name, "echo");
        assert_eq!(tool.description, None);
        assert_eq!(tool.input_schema, json!({"type": "object"}));
        assert!(tool.required_arguments().is_empty());
    }

    #[test]
    fn test_call_tool_request_omits_absent_arguments() {
        let request = CallToolRequest {
            name: "echo".to_string(),
            arguments: None,
        };
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({"name": "echo"}));
    }

    #[test]
    fn test_call_tool_response_text_and_error_flag() {
        let response: CallToolResponse = serde_json::from_value(json!({
            "content": [
                {"type": "text", "text": "first"},
                {"type": "image", "data": "aGk=", "mimeType": "image/png"},
                {"type": "text", "text": "second"}
            ],
            "isError": false
        }))
        .unwrap();

        assert!(!response.is_error());
        assert_eq!(response.text(), "first\n\nsecond");
        assert_eq!(
            response.content[1].kind(),
            ContentKind::Image {
                data: "aGk=",
                mime_type: Some("image/png")
            }
        );
    }

    #[test]
    fn test_tool_content_kind_fallbacks() {
        assert_eq!(ToolContent::text("hi").kind(), ContentKind::Text("hi"));

        let missing_text = ToolContent {
            content_type: "text".to_string(),
            text: None,
            data: None,
            mime_type: None,
        };
        assert_eq!(missing_text.kind(), ContentKind::Other("text"));

        let audio: ToolContent =
            serde_json::from_value(json!({"type": "audio", "data": "AAAA"})).unwrap();
        assert_eq!(audio.kind(), ContentKind::Other("audio"));
    }
}
