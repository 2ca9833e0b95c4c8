//! Tool registry - explicit tool catalogs and dispatch
//!
//! Registries are built once at startup by enumerating each tool variant;
//! dispatch is a name lookup, never derived from naming conventions.

use std::collections::HashMap;

use super::{
    CreateBranchTool, CreateFileTool, GenerateDiffTool, ListFilesTool, OverwriteFileTool, ReadFileTool,
    RecordLgtmTool, RunCommandTool, Tool, ToolContext, ToolResult,
};
use crate::error::{Result, TandemError};
use crate::llm::{ToolCall, ToolDefinition};

/// Manages tool dispatch for one agent role
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry (for custom tool sets)
    pub fn new() -> Self {
        Self { tools: HashMap::new() }
    }

    /// Registry for the programmer role: file operations, subprocess
    /// execution, diff retrieval, branch creation.
    pub fn programmer() -> Self {
        let mut registry = Self::new();
        registry.add_tool(Box::new(ListFilesTool));
        registry.add_tool(Box::new(ReadFileTool));
        registry.add_tool(Box::new(CreateFileTool));
        registry.add_tool(Box::new(OverwriteFileTool));
        registry.add_tool(Box::new(RunCommandTool));
        registry.add_tool(Box::new(GenerateDiffTool));
        registry.add_tool(Box::new(CreateBranchTool));
        registry
    }

    /// Registry for the reviewer role: diff retrieval plus the approval
    /// recorder. Reviewers never get write or subprocess access.
    pub fn reviewer() -> Self {
        let mut registry = Self::new();
        registry.add_tool(Box::new(GenerateDiffTool));
        registry.add_tool(Box::new(ReadFileTool));
        registry.add_tool(Box::new(RecordLgtmTool));
        registry
    }

    /// Add a tool to the registry
    pub fn add_tool(&mut self, tool: Box<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Get tool definitions for the LLM
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut defs: Vec<ToolDefinition> = self
            .tools
            .values()
            .map(|t| ToolDefinition {
                name: t.name().to_string(),
                description: t.description().to_string(),
                input_schema: t.input_schema(),
            })
            .collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    /// Execute one tool call.
    ///
    /// Unknown tool names and operational failures come back as error
    /// observations. An `Err` from a handler is unexpected and propagates,
    /// aborting the round.
    pub async fn execute(&self, call: &ToolCall, ctx: &ToolContext) -> Result<ToolResult> {
        match self.tools.get(&call.name) {
            Some(tool) => {
                tracing::debug!(tool = %call.name, "dispatching tool call");
                tool.execute(call.input.clone(), ctx)
                    .await
                    .map_err(|e| TandemError::Tool(format!("{} failed unexpectedly: {}", call.name, e)))
            }
            None => Ok(ToolResult::error(format!("Unknown tool: {}", call.name))),
        }
    }

    /// Check if a tool exists
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get the list of tool names
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::programmer()
    }
}
