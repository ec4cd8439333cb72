use serde_json::json;
use std::sync::Arc;

use crate::omission::{OmissionDetector, OmissionVocabulary, format_omission_warning};
use crate::{AgentError, ToolError, patch};

use super::{APPLY_DIFF_TOOL, RegisteredTool, ToolDefinition, required_string_argument};

/// Unified-diff write. Parse or patch failures surface verbatim and leave
/// the file untouched; the write happens only after the whole diff applied.
pub(super) fn apply_diff_tool() -> RegisteredTool {
    RegisteredTool {
        definition: ToolDefinition {
            name: APPLY_DIFF_TOOL.to_string(),
            description:
                "Apply a unified diff to an existing file. Hunks are matched by content, so line numbers in hunk headers may be approximate."
                    .to_string(),
            parameters: json!({
                "type": "object",
                "required": ["file_path", "diff"],
                "properties": {
                    "file_path": { "type": "string" },
                    "diff": { "type": "string" }
                },
                "additionalProperties": false
            }),
        },
        executor: Arc::new(|args, env| {
            Box::pin(async move {
                let file_path = required_string_argument(&args, "file_path")?;
                let diff = required_string_argument(&args, "diff")?;

                if !env.file_exists(&file_path).await? {
                    return Err(ToolError::Execution(format!(
                        "cannot patch missing file '{}'",
                        file_path
                    ))
                    .into());
                }

                let original = env.read_file(&file_path, None, None).await?;
                let updated =
                    patch::apply_unified_diff(&original, &diff).map_err(AgentError::from)?;
                env.write_file(&file_path, &updated).await?;

                let detector = OmissionDetector::new(OmissionVocabulary::default())?;
                let report = detector.detect(&original, &updated);

                let mut message = format!("Patched {}", file_path);
                if let Some(warning) = format_omission_warning(&report) {
                    message.push_str("\n\n");
                    message.push_str(&warning);
                }
                Ok(message)
            })
        }),
    }
}
