//! create_branch tool - Create or switch to a local git branch

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::{Tool, ToolContext, ToolResult, parse_input};
use crate::git::GitRepo;

#[derive(Debug, Deserialize)]
struct CreateBranchInput {
    branch_name: String,
}

pub struct CreateBranchTool;

#[async_trait]
impl Tool for CreateBranchTool {
    fn name(&self) -> &'static str {
        "create_branch"
    }

    fn description(&self) -> &'static str {
        "Creates a new git branch. If it already exists, switches to that branch."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "branch_name": {
                    "type": "string",
                    "description": "Name of the branch to create or switch to"
                }
            },
            "required": ["branch_name"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolResult, eyre::Error> {
        let input: CreateBranchInput = match parse_input(input) {
            Ok(i) => i,
            Err(r) => return Ok(r),
        };

        let repo = GitRepo::new(ctx.project_root());
        match repo.create_or_switch_branch(&input.branch_name) {
            Ok(true) => Ok(ToolResult::success(format!(
                "Created new branch '{}'",
                input.branch_name
            ))),
            Ok(false) => Ok(ToolResult::success(format!(
                "Switched to existing branch '{}'",
                input.branch_name
            ))),
            Err(e) => Ok(ToolResult::error(format!("Failed to create branch: {}", e))),
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
    async fn test_create_branch_new() {
        let dir = tempdir().unwrap();
        init_repo(dir.path());
        let ctx = ToolContext::new(dir.path());

        let tool = CreateBranchTool;
        let result = tool
            .execute(serde_json::json!({"branch_name": "feature/demo"}), &ctx)
            .await
            .unwrap();

        assert!(!result.is_error);
        assert!(result.content.contains("Created new branch 'feature/demo'"));
    }

    #[tokio::test]
    async fn test_create_branch_existing_switches() {
        let dir = tempdir().unwrap();
        init_repo(dir.path());
        let ctx = ToolContext::new(dir.path());

        let tool = CreateBranchTool;
        let _ = tool
            .execute(serde_json::json!({"branch_name": "feature/demo"}), &ctx)
            .await
            .unwrap();
        let result = tool
            .execute(serde_json::json!({"branch_name": "feature/demo"}), &ctx)
            .await
            .unwrap();

        assert!(!result.is_error);
        assert!(result.content.contains("Switched to existing branch"));
    }

    #[tokio::test]
    async fn test_create_branch_outside_repo_is_error_observation() {
        let dir = tempdir().unwrap();
        let ctx = ToolContext::new(dir.path());

        let tool = CreateBranchTool;
        let result = tool
            .execute(serde_json::json!({"branch_name": "feature/x"}), &ctx)
            .await
            .unwrap();

        assert!(result.is_error);
        assert!(result.content.contains("Failed to create branch"));
    }
}
