//! Prompt-related message types for MCP prompt template discovery.

use serde::{Deserialize, Serialize};

/// Response containing the list of available prompts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPromptsResponse {
    /// List of available prompts
    pub prompts: Vec<Prompt>,

    /// Optional cursor for next page of results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// Prompt template definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    /// Unique name of the prompt
    pub name: String,

    /// Human-readable description of the prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Named arguments of the template, in declaration order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Vec<PromptArgument>>,
}

impl Prompt {
    /// Arguments the template requires.
    pub fn required_arguments(&self) -> impl Iterator<Item = &PromptArgument> {
        self.arguments
            .iter()
            .flatten()
            .filter(|arg| arg.is_required())
    }
}

/// A named argument of a prompt template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptArgument {
    /// Argument name
    pub name: String,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether the argument must be supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

impl PromptArgument {
    /// Absent `required` means optional.
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prompt_arguments_keep_order() {
        let response: ListPromptsResponse = serde_json::from_value(json!({
            "prompts": [{
                "name": "summarize",
                "description": "Summarize a document",
                "arguments": [
                    {"name": "document", "required": true},
                    {"name": "style", "description": "tone"},
                    {"name": "length", "required": false}
                ]
            }]
        }))
        .unwrap();

        let prompt = &response.prompts[0];
        let names: Vec<_> = prompt
            .arguments
            .as_ref()
            .unwrap()
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(names, vec!["document", "style", "length"]);

        let required: Vec<_> = prompt.required_arguments().map(|a| a.name.as_str()).collect();
        assert_eq!(required, vec!["document"]);
    }

    #[test]
    fn test_prompt_without_arguments() {
        let prompt: Prompt = serde_json::from_value(json!({"name": "hello"})).unwrap();
        assert_eq!(prompt.arguments, None);
        assert_eq!(prompt.required_arguments().count(), 0);
        assert_eq!(serde_json::to_value(&prompt).unwrap(), json!({"name": "hello"}));
    }
}
