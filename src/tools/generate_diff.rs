//! generate_diff tool - Retrieve the pending change-set as a unified diff

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::{Tool, ToolContext, ToolResult, parse_input};
use crate::git::{DiffProvider, GitRepo};

#[derive(Debug, Deserialize)]
struct GenerateDiffInput {
    #[serde(default)]
    file_path: Option<String>,
}

pub struct GenerateDiffTool;

#[async_trait]
impl Tool for GenerateDiffTool {
    fn name(&self) -> &'static str {
        "generate_diff"
    }

    fn description(&self) -> &'static str {
        "Retrieve the local diff from the git repository, covering working tree, staged, and untracked changes."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "Optional path to narrow the diff to one file or directory"
                }
            }
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolResult, eyre::Error> {
        let input: GenerateDiffInput = match parse_input(input) {
            Ok(i) => i,
            Err(r) => return Ok(r),
        };

        let provider = DiffProvider::new(GitRepo::new(ctx.project_root()));
        match provider.snapshot(input.file_path.as_deref()) {
            Ok(diff) if diff.is_empty() => Ok(ToolResult::success("No local diff found")),
            Ok(diff) => Ok(ToolResult::success(diff)),
            Err(e) => Ok(ToolResult::error(format!("Failed to retrieve diff: {}", e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::tempdir;

    fn init_repo(dir: &Path) {
        for args in [
            vec!["init", "--initial-branch=main"],
            vec!["config", "user.email", "test@example.com"],
            vec!["config", "user.name", "Test"],
        ] {
            std::process::Command::new("git")
                .args(&args)
                .current_dir(dir)
                .output()
                .unwrap();
        }
        std::fs::write(dir.join("README.md"), "# test\n").unwrap();
        std::process::Command::new("git")
            .args(["add", "."])
            .current_dir(dir)
            .output()
            .unwrap();
        std::process::Command::new("git")
            .args(["commit", "-m", "initial"])
            .current_dir(dir)
            .output()
            .unwrap();
    }

    #[tokio::test]
    async fn test_generate_diff_clean_repo() {
        let dir = tempdir().unwrap();
        init_repo(dir.path());
        let ctx = ToolContext::new(dir.path());

        let tool = GenerateDiffTool;
        let result = tool.execute(serde_json::json!({}), &ctx).await.unwrap();

        assert!(!result.is_error);
        assert!(result.content.contains("No local diff found"));
    }

    #[tokio::test]
    async fn test_generate_diff_with_changes() {
        let dir = tempdir().unwrap();
        init_repo(dir.path());
        std::fs::write(dir.path().join("README.md"), "# edited\n").unwrap();
        let ctx = ToolContext::new(dir.path());

        let tool = GenerateDiffTool;
        let result = tool.execute(serde_json::json!({}), &ctx).await.unwrap();

        assert!(!result.is_error);
        assert!(result.content.contains("+# edited"));
    }

    #[tokio::test]
    async fn test_generate_diff_outside_repo_is_error_observation() {
        let dir = tempdir().unwrap();
        let ctx = ToolContext::new(dir.path());

        let tool = GenerateDiffTool;
        let result = tool.execute(serde_json::json!({}), &ctx).await.unwrap();

        assert!(result.is_error);
        assert!(result.content.contains("Failed to retrieve diff"));
    }
}
