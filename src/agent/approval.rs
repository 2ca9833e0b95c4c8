//! Approval recorder - the LGTM flag scoped to one execution context
//!
//! Every reviewer invocation owns its own flag instance; the flag is reset
//! unconditionally before the agent runs and read by the coordinator after
//! the round. Nothing process-wide is involved, so concurrent cycles cannot
//! observe each other's approvals.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cloneable handle to an execution-scoped approval bit.
///
/// Clones share the same underlying flag; independent contexts get
/// independent flags via `ApprovalFlag::new()`.
#[derive(Debug, Clone, Default)]
pub struct ApprovalFlag(Arc<AtomicBool>);

impl ApprovalFlag {
    /// Create a fresh, unset flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Record approval. Only the designated tool calls this.
    pub fn set(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Clear the flag. Called at the start of every reviewer invocation,
    /// including retries of the same round.
    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    /// Read the current approval state
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
