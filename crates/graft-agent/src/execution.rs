use crate::AgentError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Capabilities the write pipeline needs from its host. The core never
/// inspects how these are implemented; hosts may back them with a sandbox,
/// a remote worker, or the local disk.
#[async_trait]
pub trait ExecutionEnvironment: Send + Sync {
    /// Reads file content, optionally windowed to `limit` lines starting at
    /// the 1-based line `offset`.
    async fn read_file(
        &self,
        path: &str,
        offset: Option<usize>,
        limit: Option<usize>,
    ) -> Result<String, AgentError>;

    async fn write_file(&self, path: &str, content: &str) -> Result<(), AgentError>;
    async fn file_exists(&self, path: &str) -> Result<bool, AgentError>;
    async fn delete_file(&self, path: &str) -> Result<(), AgentError>;

    fn working_directory(&self) -> &Path;
    fn platform(&self) -> &str;
}

/// Local-disk implementation over `tokio::fs`. Relative paths resolve
/// against the working directory.
#[derive(Clone, Debug)]
pub struct LocalExecutionEnvironment {
    working_directory: PathBuf,
    platform: String,
}

impl LocalExecutionEnvironment {
    pub fn new(working_directory: impl Into<PathBuf>) -> Self {
        Self {
            working_directory: working_directory.into(),
            platform: std::env::consts::OS.to_string(),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let candidate = Path::new(path);
        if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            self.working_directory.join(candidate)
        }
    }
}

#[async_trait]
impl ExecutionEnvironment for LocalExecutionEnvironment {
    async fn read_file(
        &self,
        path: &str,
        offset: Option<usize>,
        limit: Option<usize>,
    ) -> Result<String, AgentError> {
        let resolved = self.resolve(path);
        let content = tokio::fs::read_to_string(&resolved)
            .await
            .map_err(|error| AgentError::Execution(format!("failed to read '{}': {}", path, error)))?;
        Ok(window_lines(&content, offset, limit))
    }

    async fn write_file(&self, path: &str, content: &str) -> Result<(), AgentError> {
        let resolved = self.resolve(path);
        if let Some(parent) = resolved.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|error| {
                AgentError::Execution(format!(
                    "failed to create parent directories for '{}': {}",
                    path, error
                ))
            })?;
        }
        tokio::fs::write(&resolved, content)
            .await
            .map_err(|error| AgentError::Execution(format!("failed to write '{}': {}", path, error)))
    }

    async fn file_exists(&self, path: &str) -> Result<bool, AgentError> {
        let resolved = self.resolve(path);
        tokio::fs::try_exists(&resolved)
            .await
            .map_err(|error| AgentError::Execution(format!("failed to stat '{}': {}", path, error)))
    }

    async fn delete_file(&self, path: &str) -> Result<(), AgentError> {
        let resolved = self.resolve(path);
        tokio::fs::remove_file(&resolved)
            .await
            .map_err(|error| AgentError::Execution(format!("failed to delete '{}': {}", path, error)))
    }

    fn working_directory(&self) -> &Path {
        &self.working_directory
    }

    fn platform(&self) -> &str {
        &self.platform
    }
}

fn window_lines(content: &str, offset: Option<usize>, limit: Option<usize>) -> String {
    if offset.is_none() && limit.is_none() {
        return content.to_string();
    }
    let start = offset.unwrap_or(1).saturating_sub(1);
    let lines = content.split('\n');
    let windowed: Vec<&str> = match limit {
        Some(limit) => lines.skip(start).take(limit).collect(),
        None => lines.skip(start).collect(),
    };
    windowed.join("\n")
}
