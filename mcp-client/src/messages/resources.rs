//! Resource-related message types for MCP resource discovery and access.
//!
//! This module provides types for:
//! - Resource discovery (`resources/list`)
//! - Resource access (`resources/read`)

use serde::{Deserialize, Serialize};

/// Response containing the list of available resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResourcesResponse {
    /// List of available resources
    pub resources: Vec<Resource>,

    /// Optional cursor for next page of results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// Resource definition including metadata and access information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Unique URI identifying the resource
    pub uri: String,

    /// Human-readable name of the resource
    pub name: String,

    /// Description of what the resource contains
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// MIME type of the resource content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl Resource {
    /// Create a new resource definition.
    pub fn new(uri: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            name: name.into(),
            description: None,
            mime_type: None,
        }
    }

    /// Set the description for this resource.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the MIME type for this resource.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

/// Parameters of a `resources/read` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadResourceRequest {
    /// URI of the resource to read
    pub uri: String,
}

/// Response containing the content of a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadResourceResponse {
    /// Content blocks of the resource
    pub contents: Vec<ResourceContents>,
}

impl ReadResourceResponse {
    /// All text blocks, joined by a newline.
    pub fn text(&self) -> String {
        self.contents
            .iter()
            .filter_map(|c| c.text.as_deref())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One content block of a resource; text or base64 `blob`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceContents {
    /// URI of the resource
    pub uri: String,

    /// MIME type of the content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    /// Text content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Base64 encoded binary content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blob: Option<String>,
}

impl ResourceContents {
    /// Whether this block carries binary data.
    pub fn is_binary(&self) -> bool {
        self.blob.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resource_creation() {
        let resource = Resource::new("file:///path/to/file.txt", "file.txt")
            .with_description("A text file")
            .with_mime_type("text/plain");

        let json = serde_json::to_value(&resource).unwrap();
        assert_eq!(json["mimeType"], "text/plain");
        assert_eq!(json["description"], "A text file");
    }

    #[test]
    fn test_list_resources_with_cursor() {
        let response: ListResourcesResponse = serde_json::from_value(json!({
            "resources": [{"uri": "docs://readme", "name": "README"}],
            "nextCursor": "page-2"
        }))
        .unwrap();

        assert_eq!(response.resources.len(), 1);
        assert_eq!(response.resources[0].description, None);
        assert_eq!(response.next_cursor.as_deref(), Some("page-2"));
    }

    #[test]
    fn test_read_resource_contents() {
        let response: ReadResourceResponse = serde_json::from_value(json!({
            "contents": [
                {"uri": "docs://readme", "mimeType": "text/markdown", "text": "# Title"},
                {"uri": "docs://logo", "blob": "iVBORw0KGgo="}
            ]
        }))
        .unwrap();

        assert_eq!(response.text(), "# Title");
        assert!(!response.contents[0].is_binary());
        assert!(response.contents[1].is_binary());
    }
}
