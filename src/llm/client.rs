//! Core LLM client trait and the scripted mock used by tests

use async_trait::async_trait;
use std::sync::Mutex;

use crate::error::{Result, TandemError};
use crate::llm::types::{CompletionRequest, CompletionResponse};

/// Stateless LLM client - each call is independent
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Single completion request (blocking until complete)
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Model identifier this client talks to
    fn model(&self) -> &str;
}

/// Scripted client returning canned responses in order.
///
/// Each `complete` call pops the next response; running out of script is a
/// test bug and surfaces as an `Llm` error. Requests are recorded for
/// assertions.
pub struct MockLlmClient {
    responses: Mutex<Vec<CompletionResponse>>,
    requests: Mutex<Vec<CompletionRequest>>,
    errors: Mutex<Vec<String>>,
}

impl MockLlmClient {
    /// Create a mock that replays the given responses in order
    pub fn new(mut responses: Vec<CompletionResponse>) -> Self {
        responses.reverse();
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
            errors: Mutex::new(Vec::new()),
        }
    }

    /// Queue an error to be returned before the remaining responses
    pub fn push_error(&self, message: impl Into<String>) {
        self.errors.lock().unwrap().push(message.into());
    }

    /// Requests seen so far
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of completions served (including errors)
    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        self.requests.lock().unwrap().push(request);

        if let Some(message) = self.errors.lock().unwrap().pop() {
            return Err(TandemError::Llm(message));
        }

        self.responses
            .lock()
            .unwrap()
            .pop()
            .ok_or_else(|| TandemError::Llm("mock script exhausted".to_string()))
    }

    fn model(&self) -> &str {
        "mock-model"
    }
}
