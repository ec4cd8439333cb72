mod apply_diff;
mod read_file;
mod registry;
mod write_file;

use crate::ToolError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use registry::{RegisteredTool, ToolDispatchOptions, ToolExecutor, ToolFuture, ToolRegistry};

pub const READ_FILE_TOOL: &str = "read_file";
pub const WRITE_FILE_TOOL: &str = "write_file";
pub const APPLY_DIFF_TOOL: &str = "apply_diff";

/// Wire-facing description of a tool, serialized into provider requests.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// A tool invocation as received from the model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
    /// Raw JSON argument text for providers that stream arguments as a
    /// string; takes precedence over `arguments` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_arguments: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub tool_call_id: String,
    pub content: Value,
    pub is_error: bool,
}

/// Registry carrying the full write pipeline: windowed reads, replacement
/// writes, and unified-diff patches.
pub fn build_write_pipeline_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::default();
    registry.register(read_file::read_file_tool());
    registry.register(write_file::write_file_tool());
    registry.register(apply_diff::apply_diff_tool());
    registry
}

fn required_string_argument(arguments: &Value, key: &str) -> Result<String, ToolError> {
    optional_string_argument(arguments, key)?
        .ok_or_else(|| ToolError::Validation(format!("missing required argument '{}'", key)))
}

fn optional_string_argument(arguments: &Value, key: &str) -> Result<Option<String>, ToolError> {
    let Some(value) = arguments.get(key) else {
        return Ok(None);
    };
    let Some(value) = value.as_str() else {
        return Err(ToolError::Validation(format!(
            "argument '{}' must be a string",
            key
        )));
    };
    Ok(Some(value.to_string()))
}

fn optional_usize_argument(arguments: &Value, key: &str) -> Result<Option<usize>, ToolError> {
    let Some(value) = arguments.get(key) else {
        return Ok(None);
    };
    let Some(value) = value.as_u64() else {
        return Err(ToolError::Validation(format!(
            "argument '{}' must be a positive integer",
            key
        )));
    };
    Ok(Some(value as usize))
}

fn format_line_numbered_content(content: &str, start_line: usize) -> String {
    if content.is_empty() {
        return String::new();
    }
    content
        .lines()
        .enumerate()
        .map(|(idx, line)| format!("{} | {}", start_line + idx, line))
        .collect::<Vec<String>>()
        .join("\n")
}

fn tool_error_result(tool_call_id: String, message: String) -> ToolResult {
    ToolResult {
        tool_call_id,
        content: Value::String(message),
        is_error: true,
    }
}

fn parse_tool_arguments(tool_call: &ToolCall) -> Result<Value, ToolError> {
    if let Some(raw_arguments) = &tool_call.raw_arguments {
        let parsed = serde_json::from_str::<Value>(raw_arguments).map_err(|error| {
            ToolError::Validation(format!(
                "invalid JSON arguments for tool '{}': {}",
                tool_call.name, error
            ))
        })?;
        return Ok(parsed);
    }

    Ok(tool_call.arguments.clone())
}

fn validate_tool_arguments(schema: &Value, arguments: &Value) -> Result<(), ToolError> {
    let object = arguments
        .as_object()
        .ok_or_else(|| ToolError::Validation("tool arguments must be a JSON object".to_string()))?;

    let schema_object = schema.as_object().ok_or_else(|| {
        ToolError::Validation("tool schema root must be a JSON object".to_string())
    })?;

    if let Some(required) = schema_object.get("required").and_then(Value::as_array) {
        for key in required.iter().filter_map(Value::as_str) {
            if !object.contains_key(key) {
                return Err(ToolError::Validation(format!(
                    "missing required argument '{}'",
                    key
                )));
            }
        }
    }

    let properties = schema_object
        .get("properties")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();
    let additional_allowed = schema_object
        .get("additionalProperties")
        .and_then(Value::as_bool)
        .unwrap_or(true);

    for (key, value) in object {
        let Some(property) = properties.get(key) else {
            if additional_allowed {
                continue;
            }
            return Err(ToolError::Validation(format!(
                "unexpected argument '{}' not allowed by schema",
                key
            )));
        };

        if let Some(type_name) = property.get("type").and_then(Value::as_str) {
            let is_valid = match type_name {
                "string" => value.is_string(),
                "number" => value.is_number(),
                "integer" => value.as_i64().is_some() || value.as_u64().is_some(),
                "boolean" => value.is_boolean(),
                "array" => value.is_array(),
                "object" => value.is_object(),
                "null" => value.is_null(),
                _ => true,
            };

            if !is_valid {
                return Err(ToolError::Validation(format!(
                    "argument '{}' expected type '{}' but received '{}'",
                    key,
                    type_name,
                    json_type_name(value)
                )));
            }
        }
    }

    Ok(())
}

fn json_type_name(value: &Value) -> &'static str {
    if value.is_null() {
        "null"
    } else if value.is_boolean() {
        "boolean"
    } else if value.is_string() {
        "string"
    } else if value.is_number() {
        "number"
    } else if value.is_array() {
        "array"
    } else {
        "object"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn build_write_pipeline_registry_exposes_expected_tools() {
        let registry = build_write_pipeline_registry();
        assert_eq!(
            registry.names(),
            vec![APPLY_DIFF_TOOL, READ_FILE_TOOL, WRITE_FILE_TOOL]
        );
    }

    #[test]
    fn required_string_argument_rejects_missing_key() {
        let err = required_string_argument(&json!({}), "file_path")
            .expect_err("missing argument should fail");
        assert!(err.to_string().contains("missing required argument"));
    }

    #[test]
    fn validate_tool_arguments_rejects_unexpected_argument() {
        let schema = json!({
            "type": "object",
            "required": ["file_path"],
            "properties": { "file_path": { "type": "string" } },
            "additionalProperties": false
        });
        let err = validate_tool_arguments(&schema, &json!({ "file_path": "a", "extra": 1 }))
            .expect_err("unexpected argument should fail");
        assert!(err.to_string().contains("unexpected argument 'extra'"));
    }

    #[test]
    fn validate_tool_arguments_rejects_wrong_type() {
        let schema = json!({
            "type": "object",
            "properties": { "offset": { "type": "integer" } }
        });
        let err = validate_tool_arguments(&schema, &json!({ "offset": "two" }))
            .expect_err("wrong type should fail");
        assert!(err.to_string().contains("expected type 'integer'"));
    }

    #[test]
    fn parse_tool_arguments_prefers_raw_json() {
        let tool_call = ToolCall {
            id: "c1".to_string(),
            name: "write_file".to_string(),
            arguments: json!({}),
            raw_arguments: Some("{\"file_path\":\"a.txt\"}".to_string()),
        };
        let parsed = parse_tool_arguments(&tool_call).expect("raw arguments should parse");
        assert_eq!(parsed["file_path"], "a.txt");
    }

    #[test]
    fn format_line_numbered_content_starts_at_offset() {
        assert_eq!(format_line_numbered_content("a\nb", 3), "3 | a\n4 | b");
    }
}
