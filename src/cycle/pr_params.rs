//! Pull-request title and body generation
//!
//! An auxiliary model call proposes the title/body; any failure or
//! malformed response falls back to a deterministic rendering so
//! publication never blocks on this step.

use std::sync::Arc;

use crate::llm::{CompletionRequest, LlmClient};
use crate::prompt::pr_params_prompt;

/// Keep the diff excerpt in the prompt bounded
const MAX_DIFF_CHARS: usize = 20_000;

/// Title and body for the pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrParams {
    pub title: String,
    pub body: String,
}

/// Generate PR parameters, falling back to a deterministic rendering on
/// any model failure or unparseable response.
pub async fn generate_pr_params(
    llm: &Arc<dyn LlmClient>,
    instruction: &str,
    programmer_output: &str,
    diff: &str,
) -> PrParams {
    let excerpt = if diff.len() > MAX_DIFF_CHARS {
        &diff[..MAX_DIFF_CHARS]
    } else {
        diff
    };

    let request =
        CompletionRequest::new("").with_user_message(pr_params_prompt(instruction, programmer_output, excerpt));

    match llm.complete(request).await {
        Ok(response) => parse_pr_params(&response.content).unwrap_or_else(|| {
            tracing::warn!("unparseable PR params response; using fallback");
            fallback_params(instruction, programmer_output)
        }),
        Err(e) => {
            tracing::warn!(error = %e, "PR params generation failed; using fallback");
            fallback_params(instruction, programmer_output)
        }
    }
}

/// Parse a `TITLE:` / `DESCRIPTION:` response
fn parse_pr_params(text: &str) -> Option<PrParams> {
    let title_start = text.find("TITLE:")?;
    let desc_start = text.find("DESCRIPTION:")?;
    if desc_start < title_start {
        return None;
    }

    let title = text[title_start + "TITLE:".len()..desc_start].trim().to_string();
    let body = text[desc_start + "DESCRIPTION:".len()..].trim().to_string();

    if title.is_empty() || body.is_empty() {
        return None;
    }

    Some(PrParams { title, body })
}

/// Deterministic rendering used when generation is unavailable
fn fallback_params(instruction: &str, programmer_output: &str) -> PrParams {
    let first_line = instruction.lines().find(|l| !l.trim().is_empty()).unwrap_or("automated change");
    let title: String = first_line.trim().chars().take(72).collect();

    let body = format!(
        "## Instruction\n\n{}\n\n## Implementation summary\n\n{}\n",
        instruction.trim(),
        if programmer_output.trim().is_empty() {
            "(no summary provided)"
        } else {
            programmer_output.trim()
        }
    );

    PrParams { title, body }
}
