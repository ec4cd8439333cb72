use serde_json::json;
use std::sync::Arc;

use crate::omission::{OmissionDetector, OmissionVocabulary, format_omission_warning};

use super::{RegisteredTool, ToolDefinition, WRITE_FILE_TOOL, required_string_argument};

/// Full-replacement write. The omission scan compares the candidate against
/// whatever the file held before (empty for a new file); its verdict is
/// appended to the success message, never turned into a failure.
pub(super) fn write_file_tool() -> RegisteredTool {
    RegisteredTool {
        definition: ToolDefinition {
            name: WRITE_FILE_TOOL.to_string(),
            description:
                "Write full replacement content to a file. Creates the file and parent directories if needed."
                    .to_string(),
            parameters: json!({
                "type": "object",
                "required": ["file_path", "content"],
                "properties": {
                    "file_path": { "type": "string" },
                    "content": { "type": "string" }
                },
                "additionalProperties": false
            }),
        },
        executor: Arc::new(|args, env| {
            Box::pin(async move {
                let file_path = required_string_argument(&args, "file_path")?;
                let content = required_string_argument(&args, "content")?;

                let original = if env.file_exists(&file_path).await? {
                    env.read_file(&file_path, None, None).await?
                } else {
                    String::new()
                };
                env.write_file(&file_path, &content).await?;

                let detector = OmissionDetector::new(OmissionVocabulary::default())?;
                let report = detector.detect(&original, &content);

                let mut message = format!("Wrote {} bytes to {}", content.len(), file_path);
                if let Some(warning) = format_omission_warning(&report) {
                    message.push_str("\n\n");
                    message.push_str(&warning);
                }
                Ok(message)
            })
        }),
    }
}
