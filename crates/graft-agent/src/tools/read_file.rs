use serde_json::json;
use std::sync::Arc;

use crate::ToolError;

use super::{READ_FILE_TOOL, RegisteredTool, ToolDefinition, required_string_argument};

/// Windowed read that grounds a rewrite or diff in the file's current
/// content. Output line numbers match the on-disk file so hunk headers
/// can be written against them.
pub(super) fn read_file_tool() -> RegisteredTool {
    RegisteredTool {
        definition: ToolDefinition {
            name: READ_FILE_TOOL.to_string(),
            description: "Read a file before proposing changes to it. Each output line is \
                          formatted as 'N | text' where N is the on-disk line number. Use \
                          offset and limit to window large files."
                .to_string(),
            parameters: json!({
                "type": "object",
                "required": ["file_path"],
                "properties": {
                    "file_path": {
                        "type": "string",
                        "description": "Path to the file, relative to the working directory"
                    },
                    "offset": {
                        "type": "integer",
                        "description": "First line to include, 1-based"
                    },
                    "limit": {
                        "type": "integer",
                        "description": "Maximum number of lines to include"
                    }
                },
                "additionalProperties": false
            }),
        },
        executor: Arc::new(|args, env| {
            Box::pin(async move {
                let file_path = required_string_argument(&args, "file_path")?;
                let offset = super::optional_usize_argument(&args, "offset")?;
                let limit = super::optional_usize_argument(&args, "limit")?;
                if offset == Some(0) {
                    return Err(ToolError::Validation(
                        "argument 'offset' is 1-based and must be at least 1".to_string(),
                    )
                    .into());
                }

                let content = env.read_file(&file_path, offset, limit).await?;
                if content.is_empty() {
                    return Ok(format!("'{}' has no lines in the requested range", file_path));
                }
                Ok(super::format_line_numbered_content(
                    &content,
                    offset.unwrap_or(1),
                ))
            })
        }),
    }
}
