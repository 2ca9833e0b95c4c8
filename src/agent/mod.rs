//! Agent layer - the tool-calling executor, role agents, approval
//! recording, and the rate-limit retry wrapper

pub mod approval;
pub mod executor;
pub mod programmer;
pub mod retry;
pub mod reviewer;

pub use approval::ApprovalFlag;
pub use executor::{AgentExecutor, AgentOutcome, ExecutorConfig};
pub use programmer::ProgrammerAgent;
pub use retry::{RATE_LIMIT_MARKERS, RetryConfig, is_rate_limit_error, retry_rate_limited};
pub use reviewer::{ReviewVerdict, ReviewerAgent};
