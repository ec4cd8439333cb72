use thiserror::Error;

/// Top-level error type for the graft-agent crate.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    #[error("execution environment error: {0}")]
    Execution(String),
    #[error(transparent)]
    Tool(#[from] ToolError),
    #[error(transparent)]
    Patch(#[from] PatchError),
}

/// Error raised by the tool layer: bad arguments or a failed execution.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("tool validation failed: {0}")]
    Validation(String),
    #[error("tool execution failed: {0}")]
    Execution(String),
}

/// Structural failure while decoding unified-diff text.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid hunk header at line {line}: '{text}'")]
    InvalidHunkHeader { line: usize, text: String },
    #[error("empty hunk body for header at line {line}")]
    EmptyHunk { line: usize },
}

/// Failure while reconciling parsed hunks against original content.
///
/// Both kinds abort the whole write attempt; a failed patch must leave the
/// previous file content untouched.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PatchError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("invalid line in hunk: '{text}'")]
    InvalidHunkLine { text: String },
    #[error("resync target not found in remaining original content: '{anchor}'")]
    ResyncTargetNotFound { anchor: String },
}

impl From<ParseError> for AgentError {
    fn from(error: ParseError) -> Self {
        AgentError::Patch(PatchError::Parse(error))
    }
}

impl From<PatchError> for ToolError {
    fn from(error: PatchError) -> Self {
        ToolError::Execution(error.to_string())
    }
}
