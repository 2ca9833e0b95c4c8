//! Code-host collaborator contract
//!
//! The coordinator publishes through this trait; the GitHub implementation
//! lives in `client.rs` and tests substitute a recording stub.

use async_trait::async_trait;

use crate::error::Result;

/// A pull request as reported by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    pub number: u64,
    pub url: String,
    pub title: String,
}

/// Hosting-side operations needed to publish one development cycle.
///
/// Failures surface as `TandemError::Host { status, message }`; an
/// "already exists" message on pull-request creation is recovered by the
/// caller via `find_open_pull`, never treated as fatal.
#[async_trait]
pub trait CodeHost: Send + Sync {
    /// Ensure the branch exists on the host, created from `base` if absent
    async fn create_branch(&self, branch: &str, base: &str) -> Result<()>;

    /// Push the given changed files to the branch with one commit
    async fn push_files(&self, branch: &str, paths: &[String], message: &str) -> Result<()>;

    /// Open a pull request from `head` into `base`
    async fn create_pull_request(&self, title: &str, body: &str, head: &str, base: &str) -> Result<PullRequest>;

    /// Find an already-open pull request for the head branch, if any
    async fn find_open_pull(&self, head: &str) -> Result<Option<PullRequest>>;
}
