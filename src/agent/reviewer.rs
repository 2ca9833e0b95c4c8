//! Reviewer agent - inspects a diff and records approval via tool call

use std::sync::Arc;

use crate::agent::executor::{AgentExecutor, ExecutorConfig};
use crate::error::Result;
use crate::llm::LlmClient;
use crate::prompt::{REVIEWER_SYSTEM_MESSAGE, review_input};
use crate::tools::{ToolContext, ToolRegistry};

/// One reviewer round's verdict. Immutable once produced.
#[derive(Debug, Clone)]
pub struct ReviewVerdict {
    /// The reviewer's closing summary text
    pub summary: String,
    /// Whether the designated approval tool was called this round
    pub lgtm: bool,
    /// Bulleted improvement points extracted from the summary, in order
    pub suggestions: Vec<String>,
}

/// The reviewer role: read-only tools plus the approval recorder.
pub struct ReviewerAgent {
    executor: AgentExecutor,
}

impl ReviewerAgent {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            executor: AgentExecutor::new(llm, ToolRegistry::reviewer(), REVIEWER_SYSTEM_MESSAGE),
        }
    }

    pub fn with_config(llm: Arc<dyn LlmClient>, config: ExecutorConfig) -> Self {
        Self {
            executor: AgentExecutor::with_config(llm, ToolRegistry::reviewer(), REVIEWER_SYSTEM_MESSAGE, config),
        }
    }

    /// Run one review round over the given diff.
    ///
    /// The context's approval flag is reset unconditionally before the
    /// agent runs, including on retries of the same round, so the final
    /// flag value depends only on this round's tool calls.
    pub async fn review(&self, diff: &str, note: Option<&str>, ctx: &ToolContext) -> Result<ReviewVerdict> {
        ctx.approval().reset();

        let input = review_input(diff, note);
        let outcome = self.executor.run(&input, ctx).await?;

        let lgtm = ctx.approval().is_set();
        if lgtm {
            tracing::info!("review approved (LGTM recorded)");
        } else {
            tracing::info!("review returned feedback without approval");
        }

        Ok(ReviewVerdict {
            suggestions: extract_suggestions(&outcome.output),
            summary: outcome.output,
            lgtm,
        })
    }
}

/// Pull ordered bullet points out of a review summary
fn extract_suggestions(summary: &str) -> Vec<String> {
    summary
        .lines()
        .filter_map(|line| {
            let trimmed = line.trim_start();
            trimmed
                .strip_prefix("- ")
                .or_else(|| trimmed.strip_prefix("* "))
                .map(|s| s.trim().to_string())
        })
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{CompletionResponse, MockLlmClient, StopReason, ToolCall};
    use tempfile::tempdir;

    fn text_response(content: &str) -> CompletionResponse {
        CompletionResponse {
            content: content.to_string(),
            tool_calls: vec![],
            stop_reason: StopReason::EndTurn,
            usage: Default::default(),
        }
    }

    fn lgtm_response() -> CompletionResponse {
        CompletionResponse {
            content: String::new(),
            tool_calls: vec![ToolCall::new("toolu_1", "record_lgtm", serde_json::json!({}))],
            stop_reason: StopReason::ToolUse,
            usage: Default::default(),
        }
    }

    #[tokio::test]
    async fn test_review_with_approval() {
        let dir = tempdir().unwrap();
        let llm = Arc::new(MockLlmClient::new(vec![
            lgtm_response(),
            text_response("Looks good, approved."),
        ]));

        let agent = ReviewerAgent::new(llm);
        let ctx = ToolContext::new(dir.path());
        let verdict = agent.review("diff --git a/x b/x", None, &ctx).await.unwrap();

        assert!(verdict.lgtm);
        assert_eq!(verdict.summary, "Looks good, approved.");
        assert!(verdict.suggestions.is_empty());
    }

    #[tokio::test]
    async fn test_review_without_approval_collects_suggestions() {
        let dir = tempdir().unwrap();
        let llm = Arc::new(MockLlmClient::new(vec![text_response(
            "Issues found:\n- missing error handling\n- no tests for the edge case",
        )]));

        let agent = ReviewerAgent::new(llm);
        let ctx = ToolContext::new(dir.path());
        let verdict = agent.review("diff", None, &ctx).await.unwrap();

        assert!(!verdict.lgtm);
        assert_eq!(
            verdict.suggestions,
            vec!["missing error handling".to_string(), "no tests for the edge case".to_string()]
        );
    }

    #[tokio::test]
    async fn test_review_resets_stale_approval() {
        let dir = tempdir().unwrap();
        let llm = Arc::new(MockLlmClient::new(vec![text_response("needs work")]));

        let agent = ReviewerAgent::new(llm);
        let ctx = ToolContext::new(dir.path());

        // A stale approval from a previous use of this context must not
        // leak into the new round.
        ctx.approval().set();
        let verdict = agent.review("diff", None, &ctx).await.unwrap();

        assert!(!verdict.lgtm);
    }

    #[tokio::test]
    async fn test_review_passes_note_through() {
        let dir = tempdir().unwrap();
        let llm = Arc::new(MockLlmClient::new(vec![text_response("ok")]));

        let agent = ReviewerAgent::new(llm.clone());
        let ctx = ToolContext::new(dir.path());
        let _ = agent.review("diff", Some("cycle 2 of 3"), &ctx).await.unwrap();

        let requests = llm.requests();
        assert!(requests[0].messages[0].text().contains("cycle 2 of 3"));
    }

    #[test]
    fn test_extract_suggestions_handles_mixed_markers() {
        let suggestions = extract_suggestions("intro\n- first\n  * second\nclosing");
        assert_eq!(suggestions, vec!["first".to_string(), "second".to_string()]);
    }
}
