//! list_files tool - Enumerate project files by glob pattern

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::{Tool, ToolContext, ToolResult, parse_input};

/// Upper bound on listed entries so one call cannot flood the transcript
const MAX_ENTRIES: usize = 500;

#[derive(Debug, Deserialize)]
struct ListFilesInput {
    #[serde(default)]
    pattern: Option<String>,
}

pub struct ListFilesTool;

#[async_trait]
impl Tool for ListFilesTool {
    fn name(&self) -> &'static str {
        "list_files"
    }

    fn description(&self) -> &'static str {
        "Lists files under the project root matching a glob pattern (default: all files)."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "pattern": {
                    "type": "string",
                    "description": "Glob pattern relative to the project root, e.g. '**/*.rs' or 'src/**/*.md'"
                }
            }
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolResult, eyre::Error> {
        let input: ListFilesInput = match parse_input(input) {
            Ok(i) => i,
            Err(r) => return Ok(r),
        };

        let pattern = input.pattern.unwrap_or_else(|| "**/*".to_string());
        let full_pattern = ctx.project_root().join(&pattern);
        let full_pattern = full_pattern.to_string_lossy();

        let paths = match glob::glob(&full_pattern) {
            Ok(paths) => paths,
            Err(e) => return Ok(ToolResult::error(format!("Invalid pattern '{}': {}", pattern, e))),
        };

        let root = ctx.project_root();
        let mut files: Vec<String> = paths
            .filter_map(|entry| entry.ok())
            .filter(|p| p.is_file())
            .filter_map(|p| {
                p.strip_prefix(root)
                    .map(|rel| rel.to_string_lossy().to_string())
                    .ok()
            })
            .take(MAX_ENTRIES)
            .collect();
        files.sort();

        if files.is_empty() {
            Ok(ToolResult::success(format!("No files match '{}'", pattern)))
        } else {
            Ok(ToolResult::success(files.join("\n")))
        }
    }
}
