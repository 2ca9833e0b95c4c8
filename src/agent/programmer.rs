//! Programmer agent - edits files via tool calls

use std::sync::Arc;

use crate::agent::executor::{AgentExecutor, AgentOutcome, ExecutorConfig};
use crate::error::Result;
use crate::llm::LlmClient;
use crate::prompt::{PROGRAMMER_SYSTEM_MESSAGE, programmer_input};
use crate::tools::{ToolContext, ToolRegistry};

/// The programmer role: full file/subprocess tool access, driven by the
/// caller's instruction plus any reviewer feedback from the prior round.
pub struct ProgrammerAgent {
    executor: AgentExecutor,
}

impl ProgrammerAgent {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            executor: AgentExecutor::new(llm, ToolRegistry::programmer(), PROGRAMMER_SYSTEM_MESSAGE),
        }
    }

    pub fn with_config(llm: Arc<dyn LlmClient>, config: ExecutorConfig) -> Self {
        Self {
            executor: AgentExecutor::with_config(llm, ToolRegistry::programmer(), PROGRAMMER_SYSTEM_MESSAGE, config),
        }
    }

    /// Run one programmer round.
    ///
    /// The instruction is never mutated; feedback folding derives a fresh
    /// input string for this round only.
    pub async fn run(
        &self,
        instruction: &str,
        reviewer_feedback: Option<&str>,
        ctx: &ToolContext,
    ) -> Result<AgentOutcome> {
        let input = programmer_input(instruction, reviewer_feedback);
        tracing::info!(feedback = reviewer_feedback.is_some(), "running programmer round");
        self.executor.run(&input, ctx).await
    }
}
