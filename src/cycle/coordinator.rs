//! Development-cycle coordinator
//!
//! Sequences programmer/reviewer rounds, tracks approval state, and
//! performs idempotent publication:
//! BranchPending -> Iterating -> {Approved | Exhausted} -> Publishing -> Done.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::agent::executor::ExecutorConfig;
use crate::agent::retry::{RetryConfig, retry_rate_limited};
use crate::agent::{ProgrammerAgent, ReviewVerdict, ReviewerAgent};
use crate::cycle::branch::{derive_branch_name, sanitize_branch_name};
use crate::cycle::pr_params::generate_pr_params;
use crate::error::{Result, TandemError};
use crate::git::{DiffProvider, GitRepo};
use crate::github::{CodeHost, PullRequest};
use crate::llm::LlmClient;
use crate::tools::ToolContext;

/// Coordinator state. Rounds never start before the previous round's
/// verdict has been read; publication never starts before the final diff
/// check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    BranchPending,
    Iterating,
    Approved,
    Exhausted,
    Publishing,
    Done,
}

impl fmt::Display for CycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CycleState::BranchPending => "branch-pending",
            CycleState::Iterating => "iterating",
            CycleState::Approved => "approved",
            CycleState::Exhausted => "exhausted",
            CycleState::Publishing => "publishing",
            CycleState::Done => "done",
        };
        f.write_str(name)
    }
}

/// Final artifacts of one development cycle. Produced exactly once.
#[derive(Debug, Clone)]
pub struct CycleResult {
    pub programmer_output: String,
    pub reviewer_summary: String,
    pub branch_name: String,
    pub pr_title: String,
    pub pr_body: String,
    pub pr_number: Option<u64>,
    pub pr_url: Option<String>,
    /// Number of programmer/reviewer rounds executed
    pub rounds: usize,
    /// False when the iteration budget ran out without LGTM
    pub approved: bool,
    pub completed_at: DateTime<Utc>,
}

/// Coordinator settings, resolved from the application config
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Maximum programmer/reviewer rounds
    pub max_iterations: usize,
    /// Branch pull requests merge into
    pub base_branch: String,
    /// Optional subtree restricting diffs and publication
    pub scope_path: Option<String>,
    /// Commit message for the published change
    pub commit_message: String,
    pub retry: RetryConfig,
    pub executor: ExecutorConfig,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            max_iterations: 3,
            base_branch: "main".to_string(),
            scope_path: None,
            commit_message: "auto: generated by tandem development cycle".to_string(),
            retry: RetryConfig::default(),
            executor: ExecutorConfig::default(),
        }
    }
}

/// Runs complete development cycles against one repository.
///
/// One logical task per cycle; all mutable round state (approval flags,
/// transcripts) is scoped to the round's own context, so multiple
/// coordinators may run concurrently in one process as long as they target
/// different working directories and branches (caller-enforced).
pub struct Coordinator {
    llm: Arc<dyn LlmClient>,
    host: Arc<dyn CodeHost>,
    repo: GitRepo,
    diffs: DiffProvider,
    programmer: ProgrammerAgent,
    reviewer: ReviewerAgent,
    config: CoordinatorConfig,
}

impl Coordinator {
    pub fn new(llm: Arc<dyn LlmClient>, host: Arc<dyn CodeHost>, repo: GitRepo, config: CoordinatorConfig) -> Self {
        let programmer = ProgrammerAgent::with_config(llm.clone(), config.executor.clone());
        let reviewer = ReviewerAgent::with_config(llm.clone(), config.executor.clone());
        Self {
            diffs: DiffProvider::new(repo.clone()),
            llm,
            host,
            repo,
            programmer,
            reviewer,
            config,
        }
    }

    /// Run one development cycle for the instruction.
    ///
    /// `branch` may supply the working branch; otherwise one is derived via
    /// an auxiliary model call. Either way the name is non-empty before any
    /// round begins.
    pub async fn run_cycle(&self, instruction: &str, branch: Option<&str>) -> Result<CycleResult> {
        let mut state = CycleState::BranchPending;

        let branch_name = match branch {
            Some(name) => sanitize_branch_name(name)?,
            None => derive_branch_name(&self.llm, instruction).await?,
        };

        transition(&mut state, CycleState::Iterating);
        let scope = self.config.scope_path.as_deref();

        let mut programmer_output = String::new();
        let mut verdict: Option<ReviewVerdict> = None;
        let mut rounds = 0;
        let mut approved = false;

        for round in 1..=self.config.max_iterations {
            rounds = round;
            tracing::info!(round, total = self.config.max_iterations, "development cycle round");

            // Feedback folding derives a fresh instruction string per round
            let feedback = verdict.as_ref().map(|v| v.summary.clone());
            let programmer_ctx = ToolContext::new(self.repo.root());
            let outcome = retry_rate_limited(self.config.retry, || {
                self.programmer.run(instruction, feedback.as_deref(), &programmer_ctx)
            })
            .await?;
            if !outcome.finalized {
                tracing::warn!(round, "programmer round hit its iteration cap; output may be incomplete");
            }
            programmer_output = outcome.output;

            // The snapshot reflects exactly this round's writes
            let diff = self.diffs.snapshot(scope)?;
            let note = format!(
                "Implementation for round {} of {} is complete. Do not record LGTM if the diff is empty.",
                round, self.config.max_iterations
            );

            let reviewer_ctx = ToolContext::new(self.repo.root());
            let round_verdict = retry_rate_limited(self.config.retry, || {
                self.reviewer.review(&diff, Some(&note), &reviewer_ctx)
            })
            .await?;

            let lgtm = round_verdict.lgtm;
            verdict = Some(round_verdict);

            if lgtm {
                approved = true;
                break;
            }
        }

        transition(
            &mut state,
            if approved { CycleState::Approved } else { CycleState::Exhausted },
        );

        // An exhausted cycle still publishes, annotated as unapproved; the
        // empty-diff guard below applies in both cases.
        transition(&mut state, CycleState::Publishing);

        let diff = self.diffs.snapshot(scope)?;
        if diff.is_empty() {
            tracing::warn!("no diff found after {} rounds; aborting publication", rounds);
            return Err(TandemError::EmptyDiff);
        }

        let mut files = self.repo.changed_files(scope)?;
        files.extend(self.repo.untracked_files(scope)?);

        let params = generate_pr_params(&self.llm, instruction, &programmer_output, &diff).await;

        self.host.create_branch(&branch_name, &self.config.base_branch).await?;
        self.host
            .push_files(&branch_name, &files, &self.config.commit_message)
            .await?;

        let pull = self
            .create_or_adopt_pull(&params.title, &params.body, &branch_name)
            .await?;
        tracing::info!(pr = pull.number, url = %pull.url, "pull request ready");

        transition(&mut state, CycleState::Done);

        Ok(CycleResult {
            programmer_output,
            reviewer_summary: verdict.map(|v| v.summary).unwrap_or_default(),
            branch_name,
            pr_title: params.title,
            pr_body: params.body,
            pr_number: Some(pull.number),
            pr_url: Some(pull.url),
            rounds,
            approved,
            completed_at: Utc::now(),
        })
    }

    /// Create the pull request, adopting a pre-existing open one when
    /// creation reports a conflict. Never double-creates, never fails on a
    /// harmless duplicate.
    async fn create_or_adopt_pull(&self, title: &str, body: &str, head: &str) -> Result<PullRequest> {
        match self
            .host
            .create_pull_request(title, body, head, &self.config.base_branch)
            .await
        {
            Ok(pull) => Ok(pull),
            Err(TandemError::Host { status, message }) if message.to_lowercase().contains("already exists") => {
                tracing::info!(head, "pull request already exists; adopting it");
                self.host.find_open_pull(head).await?.ok_or(TandemError::Host {
                    status,
                    message: "creation reported an existing pull request, but none was found".to_string(),
                })
            }
            Err(e) => Err(e),
        }
    }
}

/// Advance the cycle state, logging the transition
fn transition(state: &mut CycleState, next: CycleState) {
    tracing::info!(from = %state, to = %next, "cycle state transition");
    *state = next;
}
