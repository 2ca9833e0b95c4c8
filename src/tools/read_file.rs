//! read_file tool - Read the contents of a file

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::{Tool, ToolContext, ToolResult, parse_input};

#[derive(Debug, Deserialize)]
struct ReadFileInput {
    filepath: String,
}

pub struct ReadFileTool;

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &'static str {
        "read_file"
    }

    fn description(&self) -> &'static str {
        "Reads the specified file and returns its contents."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "filepath": {
                    "type": "string",
                    "description": "Path of the file to read, relative to the project root"
                }
            },
            "required": ["filepath"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolResult, eyre::Error> {
        let input: ReadFileInput = match parse_input(input) {
            Ok(i) => i,
            Err(r) => return Ok(r),
        };

        let path = ctx.resolve(&input.filepath);
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(ToolResult::success(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(ToolResult::error(format!("File not found: {}", input.filepath)))
            }
            Err(e) => Ok(ToolResult::error(format!(
                "Failed to read {}: {}",
                input.filepath, e
            ))),
        }
    }
}
