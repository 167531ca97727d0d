//! Console rendering of MCP results.

use std::fmt::Write;

use mcp_client::codec::preview;
use mcp_client::messages::{ContentKind, Prompt, Resource};
use mcp_client::{CallToolResponse, InitializeResponse, Tool};

pub fn server(info: &InitializeResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Server: {} {}",
        info.server_info.name, info.server_info.version
    );
    let _ = writeln!(out, "Protocol: {}", info.protocol_version);

    let capabilities = &info.capabilities;
    let announced: Vec<&str> = [
        ("tools", capabilities.supports_tools()),
        ("resources", capabilities.supports_resources()),
        ("prompts", capabilities.supports_prompts()),
        ("logging", capabilities.supports_logging()),
    ]
    .into_iter()
    .filter_map(|(name, supported)| supported.then_some(name))
    .collect();
    let _ = writeln!(
        out,
        "Capabilities: {}",
        if announced.is_empty() {
            "none".to_string()
        } else {
            announced.join(", ")
        }
    );

    if let Some(instructions) = &info.instructions {
        let _ = writeln!(out, "Instructions: {instructions}");
    }
    out
}

pub fn tool(tool: &Tool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Tool: {}", tool.name);
    if let Some(description) = &tool.description {
        let _ = writeln!(out, "Description: {description}");
    }
    let _ = writeln!(out, "Input Schema:");
    let schema = serde_json::to_string_pretty(&tool.input_schema)
        .unwrap_or_else(|_| tool.input_schema.to_string());
    for line in schema.lines() {
        let _ = writeln!(out, "  {line}");
    }
    out
}

pub fn tool_result(result: &CallToolResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Result (Error: {}):", result.is_error());
    for (index, content) in result.content.iter().enumerate() {
        let _ = writeln!(out, "Content #{}:", index + 1);
        let _ = writeln!(out, "  Type: {}", content.content_type);
        match content.kind() {
            ContentKind::Text(text) => {
                let _ = writeln!(out, "  Text: {}", preview(text));
            }
            ContentKind::Image { data, mime_type } => {
                let _ = writeln!(
                    out,
                    "  Image: {} bytes (base64), MIME Type: {}",
                    data.len(),
                    mime_type.unwrap_or("unknown")
                );
            }
            ContentKind::Resource | ContentKind::Other(_) => {}
        }
    }
    out
}

pub fn resource(resource: &Resource) -> String {
    let mut line = format!("{} ({})", resource.name, resource.uri);
    if let Some(mime_type) = &resource.mime_type {
        let _ = write!(line, " [{mime_type}]");
    }
    if let Some(description) = &resource.description {
        let _ = write!(line, " - {description}");
    }
    line
}

pub fn prompt(prompt: &Prompt) -> String {
    let arguments: Vec<String> = prompt
        .arguments
        .iter()
        .flatten()
        .map(|arg| {
            if arg.is_required() {
                arg.name.clone()
            } else {
                format!("[{}]", arg.name)
            }
        })
        .collect();

    let mut line = prompt.name.clone();
    if !arguments.is_empty() {
        let _ = write!(line, "({})", arguments.join(", "));
    }
    if let Some(description) = &prompt.description {
        let _ = write!(line, " - {description}");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_rendering() {
        let tool = Tool::new("echo")
            .with_description("Echo a message")
            .with_input_schema(json!({"type": "object"}));
        let rendered = super::tool(&tool);

        assert!(rendered.starts_with("Tool: echo\nDescription: Echo a message\nInput Schema:\n"));
        assert!(rendered.contains("  \"type\": \"object\""));
    }

    #[test]
    fn test_tool_result_rendering_truncates_text() {
        let result: CallToolResponse = serde_json::from_value(json!({
            "content": [
                {"type": "text", "text": "x".repeat(500)},
                {"type": "image", "data": "aGVsbG8=", "mimeType": "image/png"}
            ],
            "isError": true
        }))
        .unwrap();
        let rendered = tool_result(&result);

        assert!(rendered.starts_with("Result (Error: true):"));
        assert!(rendered.contains(&format!("  Text: {}…", "x".repeat(200))));
        assert!(rendered.contains("MIME Type: image/png"));
    }

    #[test]
    fn test_prompt_rendering_marks_optional_arguments() {
        let prompt: Prompt = serde_json::from_value(json!({
            "name": "greet",
            "description": "Say hello",
            "arguments": [{"name": "who", "required": true}, {"name": "tone"}]
        }))
        .unwrap();
        assert_eq!(super::prompt(&prompt), "greet(who, [tone]) - Say hello");
    }

    #[test]
    fn test_server_rendering() {
        let info: InitializeResponse = serde_json::from_value(json!({
            "protocolVersion": "2024-11-05",
            "capabilities": {"tools": {}, "prompts": {}},
            "serverInfo": {"name": "demo", "version": "1.0"}
        }))
        .unwrap();
        let rendered = server(&info);
        assert!(rendered.contains("Server: demo 1.0"));
        assert!(rendered.contains("Capabilities: tools, prompts"));
    }
}
