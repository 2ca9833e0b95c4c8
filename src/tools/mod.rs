//! Tool system for LLM interactions
//!
//! Tools give the programmer and reviewer agents file system access,
//! command execution, diff retrieval, branch creation, and the approval
//! recorder. Each agent invocation gets a ToolContext scoped to one
//! project root.

mod context;
mod create_branch;
mod create_file;
mod generate_diff;
mod list_files;
mod overwrite_file;
mod read_file;
mod record_lgtm;
mod registry;
mod run_command;

pub use context::ToolContext;
pub use registry::ToolRegistry;

use async_trait::async_trait;
use serde_json::Value;

/// A tool that can be called by the LLM
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (matches LLM tool_use name)
    fn name(&self) -> &'static str;

    /// Description used by the model for tool selection
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters
    fn input_schema(&self) -> Value;

    /// Execute the tool.
    ///
    /// Operational failures (missing file, non-zero exit, malformed input
    /// fields) come back as `Ok(ToolResult::error(..))` so the agent loop
    /// continues and the model can adapt. An `Err` is an unexpected handler
    /// failure and aborts the current round.
    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolResult, eyre::Error>;
}

/// Observation returned from tool execution
#[derive(Debug, Clone)]
pub struct ToolResult {
    pub content: String,
    pub is_error: bool,
}

impl ToolResult {
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: true,
        }
    }
}

/// Parse a tool's input value into its typed input struct.
///
/// A mismatch is an operational failure reported back to the model.
pub(crate) fn parse_input<T: serde::de::DeserializeOwned>(input: Value) -> Result<T, ToolResult> {
    serde_json::from_value(input).map_err(|e| ToolResult::error(format!("Invalid input: {}", e)))
}

// Re-export individual tools for direct access if needed
pub use create_branch::CreateBranchTool;
pub use create_file::CreateFileTool;
pub use generate_diff::GenerateDiffTool;
pub use list_files::ListFilesTool;
pub use overwrite_file::OverwriteFileTool;
pub use read_file::ReadFileTool;
pub use record_lgtm::RecordLgtmTool;
pub use run_command::RunCommandTool;
