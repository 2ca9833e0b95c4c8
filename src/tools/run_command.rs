//! run_command tool - Execute shell commands in the project root

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use super::{Tool, ToolContext, ToolResult, parse_input};

const DEFAULT_TIMEOUT_MS: u64 = 120_000;
const MAX_OUTPUT_CHARS: usize = 30_000;

#[derive(Debug, Deserialize)]
struct RunCommandInput {
    command: String,
    #[serde(default)]
    timeout_ms: Option<u64>,
}

pub struct RunCommandTool;

#[async_trait]
impl Tool for RunCommandTool {
    fn name(&self) -> &'static str {
        "run_command"
    }

    fn description(&self) -> &'static str {
        "Execute a shell command in the project root. Use for test runners, build tools, and git."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "command": {
                    "type": "string",
                    "description": "Shell command to execute"
                },
                "timeout_ms": {
                    "type": "integer",
                    "description": "Timeout in milliseconds (default: 120000)"
                }
            },
            "required": ["command"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolResult, eyre::Error> {
        let input: RunCommandInput = match parse_input(input) {
            Ok(i) => i,
            Err(r) => return Ok(r),
        };
        let timeout_ms = input.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS);

        let spawned = tokio::time::timeout(
            Duration::from_millis(timeout_ms),
            Command::new("sh")
                .arg("-c")
                .arg(&input.command)
                .current_dir(ctx.project_root())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .output(),
        )
        .await;

        let output = match spawned {
            Err(_) => {
                return Ok(ToolResult::error(format!(
                    "Command timed out after {}ms",
                    timeout_ms
                )));
            }
            Ok(Err(e)) => {
                return Ok(ToolResult::error(format!("Failed to spawn command: {}", e)));
            }
            Ok(Ok(output)) => output,
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        let combined = if stdout.is_empty() && !stderr.is_empty() {
            stderr.to_string()
        } else if stderr.is_empty() {
            stdout.to_string()
        } else {
            format!("{}\n\nSTDERR:\n{}", stdout, stderr)
        };

        // Truncate long output
        let truncated = if combined.len() > MAX_OUTPUT_CHARS {
            format!(
                "{}...\n[truncated, {} chars total]",
                &combined[..MAX_OUTPUT_CHARS],
                combined.len()
            )
        } else {
            combined
        };

        if output.status.success() {
            Ok(ToolResult::success(truncated))
        } else {
            Ok(ToolResult::error(format!(
                "Exit code: {}\n{}",
                output.status.code().unwrap_or(-1),
                truncated
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_run_command_echo() {
        let dir = tempdir().unwrap();
        let ctx = ToolContext::new(dir.path());

        let tool = RunCommandTool;
        let result = tool
            .execute(serde_json::json!({"command": "echo 'Hello, World!'"}), &ctx)
            .await
            .unwrap();

        assert!(!result.is_error);
        assert!(result.content.contains("Hello, World!"));
    }

    #[tokio::test]
    async fn test_run_command_runs_in_project_root() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "found").unwrap();
        let ctx = ToolContext::new(dir.path());

        let tool = RunCommandTool;
        let result = tool
            .execute(serde_json::json!({"command": "cat marker.txt"}), &ctx)
            .await
            .unwrap();

        assert!(!result.is_error);
        assert!(result.content.contains("found"));
    }

    #[tokio::test]
    async fn test_run_command_nonzero_exit_is_error_observation() {
        let dir = tempdir().unwrap();
        let ctx = ToolContext::new(dir.path());

        let tool = RunCommandTool;
        let result = tool
            .execute(serde_json::json!({"command": "exit 3"}), &ctx)
            .await
            .unwrap();

        assert!(result.is_error);
        assert!(result.content.contains("Exit code: 3"));
    }

    #[tokio::test]
    async fn test_run_command_timeout_is_error_observation() {
        let dir = tempdir().unwrap();
        let ctx = ToolContext::new(dir.path());

        let tool = RunCommandTool;
        let result = tool
            .execute(serde_json::json!({"command": "sleep 10", "timeout_ms": 100}), &ctx)
            .await
            .unwrap();

        assert!(result.is_error);
        assert!(result.content.contains("timed out"));
    }

    #[tokio::test]
    async fn test_run_command_stderr_captured() {
        let dir = tempdir().unwrap();
        let ctx = ToolContext::new(dir.path());

        let tool = RunCommandTool;
        let result = tool
            .execute(serde_json::json!({"command": "echo 'error message' >&2"}), &ctx)
            .await
            .unwrap();

        assert!(!result.is_error);
        assert!(result.content.contains("error message"));
    }
}
