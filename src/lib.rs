//! Tandem - programmer/reviewer development-cycle automation
//!
//! Tandem drives an LLM programmer agent and an LLM reviewer agent through
//! bounded development cycles: the programmer edits files via tool calls,
//! the reviewer inspects the resulting diff and either records LGTM or
//! returns feedback, and the cycle publishes a branch and pull request once
//! approval is reached or the iteration budget runs out.

pub mod agent;
pub mod cli;
pub mod config;
pub mod cycle;
pub mod error;
pub mod git;
pub mod github;
pub mod llm;
pub mod prompt;
pub mod tools;

pub use error::{Result, TandemError};
