//! create_file tool - Create a new file with the given contents

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::{Tool, ToolContext, ToolResult, parse_input};

#[derive(Debug, Deserialize)]
struct CreateFileInput {
    filepath: String,
    file_contents: String,
}

pub struct CreateFileTool;

#[async_trait]
impl Tool for CreateFileTool {
    fn name(&self) -> &'static str {
        "create_file"
    }

    fn description(&self) -> &'static str {
        "Creates a new file and writes the specified content to it. Parent directories are created as needed."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "filepath": {
                    "type": "string",
                    "description": "Path of the file to create, relative to the project root"
                },
                "file_contents": {
                    "type": "string",
                    "description": "Content to write into the new file"
                }
            },
            "required": ["filepath", "file_contents"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolResult, eyre::Error> {
        let input: CreateFileInput = match parse_input(input) {
            Ok(i) => i,
            Err(r) => return Ok(r),
        };

        let path = ctx.resolve(&input.filepath);
        if path.exists() {
            return Ok(ToolResult::error(format!(
                "File already exists: {} (use overwrite_file to replace it)",
                input.filepath
            )));
        }

        if let Some(parent) = path.parent() {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                return Ok(ToolResult::error(format!(
                    "Failed to create directories for {}: {}",
                    input.filepath, e
                )));
            }
        }

        match tokio::fs::write(&path, &input.file_contents).await {
            Ok(()) => Ok(ToolResult::success(format!(
                "Created {} ({} bytes)",
                input.filepath,
                input.file_contents.len()
            ))),
            Err(e) => Ok(ToolResult::error(format!(
                "Failed to create {}: {}",
                input.filepath, e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_create_file_basic() {
        let dir = tempdir().unwrap();
        let ctx = ToolContext::new(dir.path());

        let tool = CreateFileTool;
        let result = tool
            .execute(
                serde_json::json!({"filepath": "new.txt", "file_contents": "hello"}),
                &ctx,
            )
            .await
            .unwrap();

        assert!(!result.is_error);
        assert_eq!(std::fs::read_to_string(dir.path().join("new.txt")).unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_create_file_nested_directories() {
        let dir = tempdir().unwrap();
        let ctx = ToolContext::new(dir.path());

        let tool = CreateFileTool;
        let result = tool
            .execute(
                serde_json::json!({"filepath": "a/b/c.txt", "file_contents": "nested"}),
                &ctx,
            )
            .await
            .unwrap();

        assert!(!result.is_error);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("a/b/c.txt")).unwrap(),
            "nested"
        );
    }

    #[tokio::test]
    async fn test_create_file_refuses_existing() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("taken.txt"), "old").unwrap();
        let ctx = ToolContext::new(dir.path());

        let tool = CreateFileTool;
        let result = tool
            .execute(
                serde_json::json!({"filepath": "taken.txt", "file_contents": "new"}),
                &ctx,
            )
            .await
            .unwrap();

        assert!(result.is_error);
        assert!(result.content.contains("already exists"));
        // Existing content untouched
        assert_eq!(std::fs::read_to_string(dir.path().join("taken.txt")).unwrap(), "old");
    }
}
