//! Tool-calling agent executor
//!
//! Drives one bounded loop of {model call -> tool dispatch -> observation}
//! until the model stops requesting tools or the iteration cap is hit.
//! The loop is an explicit state machine: AwaitingModel -> DispatchingTools
//! -> Finalized. Tool side effects are immediately visible to subsequent
//! iterations within the same round; there is no sandboxing.

use std::sync::Arc;

use crate::error::Result;
use crate::llm::{CompletionRequest, ContentBlock, LlmClient, Message, ToolCall};
use crate::llm::types::ToolResult as WireToolResult;
use crate::tools::{ToolContext, ToolRegistry};

/// Hard cap on model round-trips within one agent invocation
const DEFAULT_MAX_ITERATIONS: usize = 30;

/// Outcome of one agent invocation.
#[derive(Debug, Clone)]
pub struct AgentOutcome {
    /// The model's final (or best-effort last) text output
    pub output: String,
    /// False when the iteration cap cut the loop short; the output may be
    /// incomplete and callers must treat it accordingly
    pub finalized: bool,
    /// Number of model calls made
    pub iterations: usize,
}

/// Executor loop phase
enum Phase {
    AwaitingModel,
    DispatchingTools(Vec<ToolCall>),
    Finalized(String),
}

/// Configuration for the agent executor
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    pub max_iterations: usize,
    pub max_tokens: u32,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_tokens: 8192,
        }
    }
}

/// Runs one agent round against a fixed tool registry.
pub struct AgentExecutor {
    llm: Arc<dyn LlmClient>,
    registry: ToolRegistry,
    system_prompt: String,
    config: ExecutorConfig,
}

impl AgentExecutor {
    pub fn new(llm: Arc<dyn LlmClient>, registry: ToolRegistry, system_prompt: impl Into<String>) -> Self {
        Self {
            llm,
            registry,
            system_prompt: system_prompt.into(),
            config: ExecutorConfig::default(),
        }
    }

    pub fn with_config(
        llm: Arc<dyn LlmClient>,
        registry: ToolRegistry,
        system_prompt: impl Into<String>,
        config: ExecutorConfig,
    ) -> Self {
        Self {
            llm,
            registry,
            system_prompt: system_prompt.into(),
            config,
        }
    }

    /// Run the loop until the model finalizes or the cap is hit.
    ///
    /// The transcript lives only for this invocation and is discarded on
    /// return. Hitting the cap is not a failure: the last assistant text
    /// comes back with `finalized = false`.
    pub async fn run(&self, input: &str, ctx: &ToolContext) -> Result<AgentOutcome> {
        let mut transcript: Vec<Message> = vec![Message::user(input)];
        let mut last_text = String::new();
        let mut iterations = 0;
        let mut phase = Phase::AwaitingModel;

        loop {
            phase = match phase {
                Phase::AwaitingModel => {
                    if iterations >= self.config.max_iterations {
                        tracing::warn!(
                            iterations,
                            "iteration cap hit before the model finalized; returning last output"
                        );
                        return Ok(AgentOutcome {
                            output: last_text,
                            finalized: false,
                            iterations,
                        });
                    }
                    iterations += 1;

                    let request = CompletionRequest {
                        system: self.system_prompt.clone(),
                        messages: transcript.clone(),
                        tools: self.registry.definitions(),
                        max_tokens: Some(self.config.max_tokens),
                        model: None,
                    };
                    let response = self.llm.complete(request).await?;

                    if !response.content.is_empty() {
                        last_text = response.content.clone();
                    }

                    if response.is_final() {
                        Phase::Finalized(response.content)
                    } else {
                        let mut blocks = Vec::new();
                        if !response.content.is_empty() {
                            blocks.push(ContentBlock::Text {
                                text: response.content.clone(),
                            });
                        }
                        for call in &response.tool_calls {
                            blocks.push(ContentBlock::ToolUse {
                                id: call.id.clone(),
                                name: call.name.clone(),
                                input: call.input.clone(),
                            });
                        }
                        transcript.push(Message::assistant_blocks(blocks));
                        Phase::DispatchingTools(response.tool_calls)
                    }
                }

                Phase::DispatchingTools(calls) => {
                    let mut results = Vec::with_capacity(calls.len());
                    for call in &calls {
                        let observation = self.registry.execute(call, ctx).await?;
                        results.push(if observation.is_error {
                            WireToolResult::error(&call.id, observation.content)
                        } else {
                            WireToolResult::success(&call.id, observation.content)
                        });
                    }
                    transcript.push(Message::tool_results(&results));
                    Phase::AwaitingModel
                }

                Phase::Finalized(output) => {
                    tracing::debug!(iterations, "agent round finalized");
                    return Ok(AgentOutcome {
                        output,
                        finalized: true,
                        iterations,
                    });
                }
            };
        }
    }
}
