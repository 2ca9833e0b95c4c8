//! Working-branch naming
//!
//! A branch name is either caller-supplied or derived via an auxiliary
//! model call; both paths go through the same sanitizer enforcing the
//! conservative naming convention (lowercase, hyphen-separated, semantic
//! prefix, bounded length).

use std::sync::Arc;

use crate::error::{Result, TandemError};
use crate::llm::{CompletionRequest, LlmClient};
use crate::prompt::branch_name_prompt;

/// Accepted semantic prefixes, in preference order
pub const BRANCH_PREFIXES: &[&str] = &["feature/", "bugfix/", "refactor/", "chore/"];

/// Upper bound on branch name length
pub const MAX_BRANCH_LEN: usize = 50;

/// Normalize a raw branch name to the naming convention.
///
/// Lowercases, maps whitespace and underscores to hyphens, drops anything
/// outside `[a-z0-9/-]`, collapses runs, prepends `feature/` when no known
/// prefix is present, and caps the length. Returns an error when nothing
/// usable remains.
pub fn sanitize_branch_name(raw: &str) -> Result<String> {
    let first_line = raw.lines().next().unwrap_or("").trim();

    let mut cleaned = String::with_capacity(first_line.len());
    let mut last_hyphen = false;
    for c in first_line.to_lowercase().chars() {
        let mapped = match c {
            'a'..='z' | '0'..='9' | '/' => Some(c),
            ' ' | '\t' | '_' | '-' => Some('-'),
            _ => None,
        };
        if let Some(c) = mapped {
            if c == '-' {
                if last_hyphen {
                    continue;
                }
                last_hyphen = true;
            } else {
                last_hyphen = false;
            }
            cleaned.push(c);
        }
    }
    let cleaned = cleaned.trim_matches(['-', '/']).to_string();

    // A prefix with nothing after it carries no information about the change
    if BRANCH_PREFIXES.iter().any(|p| p.trim_end_matches('/') == cleaned) {
        return Err(TandemError::BranchMissing);
    }

    let named = if BRANCH_PREFIXES.iter().any(|p| cleaned.starts_with(p)) {
        cleaned
    } else if cleaned.is_empty() {
        String::new()
    } else {
        format!("feature/{}", cleaned)
    };

    let mut capped: String = named.chars().take(MAX_BRANCH_LEN).collect();
    capped = capped.trim_matches(['-', '/']).to_string();

    if capped.is_empty() {
        return Err(TandemError::BranchMissing);
    }

    Ok(capped)
}

/// Derive a branch name from the instruction via an auxiliary model call
pub async fn derive_branch_name(llm: &Arc<dyn LlmClient>, instruction: &str) -> Result<String> {
    let request = CompletionRequest::new("").with_user_message(branch_name_prompt(instruction));
    let response = llm.complete(request).await?;

    let name = sanitize_branch_name(&response.content)?;
    tracing::info!(branch = %name, "derived working branch name");
    Ok(name)
}
