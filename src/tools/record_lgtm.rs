//! record_lgtm tool - Record review approval for the current context
//!
//! The only writer of the approval flag. The coordinator reads the flag
//! from the reviewer's context after the round finishes.

use async_trait::async_trait;
use serde_json::Value;

use super::{Tool, ToolContext, ToolResult};

pub struct RecordLgtmTool;

#[async_trait]
impl Tool for RecordLgtmTool {
    fn name(&self) -> &'static str {
        "record_lgtm"
    }

    fn description(&self) -> &'static str {
        "Records LGTM (Looks Good To Me) approval for the current review. Only call when the change can be approved as-is."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _input: Value, ctx: &ToolContext) -> Result<ToolResult, eyre::Error> {
        ctx.approval().set();
        Ok(ToolResult::success("LGTM recorded"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_record_lgtm_sets_flag() {
        let dir = tempdir().unwrap();
        let ctx = ToolContext::new(dir.path());
        assert!(!ctx.approval().is_set());

        let tool = RecordLgtmTool;
        let result = tool.execute(serde_json::json!({}), &ctx).await.unwrap();

        assert!(!result.is_error);
        assert!(result.content.contains("LGTM recorded"));
        assert!(ctx.approval().is_set());
    }

    #[tokio::test]
    async fn test_record_lgtm_does_not_leak_between_contexts() {
        let dir = tempdir().unwrap();
        let a = ToolContext::new(dir.path());
        let b = ToolContext::new(dir.path());

        let tool = RecordLgtmTool;
        let _ = tool.execute(serde_json::json!({}), &a).await.unwrap();

        assert!(a.approval().is_set());
        assert!(!b.approval().is_set());
    }
}
