//! overwrite_file tool - Replace the contents of an existing file

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::{Tool, ToolContext, ToolResult, parse_input};

#[derive(Debug, Deserialize)]
struct OverwriteFileInput {
    filepath: String,
    new_text: String,
}

pub struct OverwriteFileTool;

#[async_trait]
impl Tool for OverwriteFileTool {
    fn name(&self) -> &'static str {
        "overwrite_file"
    }

    fn description(&self) -> &'static str {
        "Overwrites the specified existing file with new content."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "filepath": {
                    "type": "string",
                    "description": "Path of the file to overwrite, relative to the project root"
                },
                "new_text": {
                    "type": "string",
                    "description": "Replacement content for the file"
                }
            },
            "required": ["filepath", "new_text"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolResult, eyre::Error> {
        let input: OverwriteFileInput = match parse_input(input) {
            Ok(i) => i,
            Err(r) => return Ok(r),
        };

        let path = ctx.resolve(&input.filepath);
        if !path.exists() {
            return Ok(ToolResult::error(format!(
                "File not found: {} (use create_file for new files)",
                input.filepath
            )));
        }

        match tokio::fs::write(&path, &input.new_text).await {
            Ok(()) => Ok(ToolResult::success(format!(
                "Overwrote {} ({} bytes)",
                input.filepath,
                input.new_text.len()
            ))),
            Err(e) => Ok(ToolResult::error(format!(
                "Failed to overwrite {}: {}",
                input.filepath, e
            ))),
        }
    }
}
