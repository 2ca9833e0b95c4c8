//! Three-tier diff snapshot of the pending change-set
//!
//! Checks, in order, and stops at the first non-empty source:
//! 1. working tree vs. last commit
//! 2. staging area vs. last commit
//! 3. untracked files, synthesized as `new file` diff blocks
//!
//! The most immediately pending work should dominate reviewer attention;
//! fallback tiers only matter when a higher tier has nothing.

use sha2::{Digest, Sha256};
use std::path::Path;

use crate::error::Result;
use crate::git::repo::GitRepo;

/// Computes unified-diff snapshots for one repository.
#[derive(Debug, Clone)]
pub struct DiffProvider {
    repo: GitRepo,
}

impl DiffProvider {
    pub fn new(repo: GitRepo) -> Self {
        Self { repo }
    }

    /// Collect the current change-set as unified diff text.
    ///
    /// An empty string means no pending changes anywhere; callers treat
    /// that as a distinct condition, not an error.
    pub fn snapshot(&self, scope: Option<&str>) -> Result<String> {
        let working = self.repo.diff_working_tree(scope)?;
        if !working.is_empty() {
            return Ok(working);
        }

        let staged = self.repo.diff_staged(scope)?;
        if !staged.is_empty() {
            return Ok(staged);
        }

        let untracked = self.repo.untracked_files(scope)?;
        Ok(self.synthesize_untracked(&untracked))
    }

    /// Render untracked files as `new file` blocks with the same header
    /// conventions as tracked changes, so one prompt handles all tiers.
    fn synthesize_untracked(&self, files: &[String]) -> String {
        let mut out = String::new();

        for file in files {
            let path = self.repo.root().join(file);
            out.push_str(&format!("diff --git a/{file} b/{file}\n"));
            out.push_str("new file mode 100644\n");

            match read_text(&path) {
                Some(content) => {
                    out.push_str(&format!("index 0000000..{}\n", pseudo_blob_id(&content)));
                    out.push_str("--- /dev/null\n");
                    out.push_str(&format!("+++ b/{file}\n"));
                    for line in content.split('\n') {
                        out.push('+');
                        out.push_str(line);
                        out.push('\n');
                    }
                    out.push('\n');
                }
                None => {
                    out.push_str(&format!("Binary file {file} added\n\n"));
                }
            }
        }

        out
    }
}

/// Read a file as UTF-8 text; None for unreadable or binary content
fn read_text(path: &Path) -> Option<String> {
    let bytes = std::fs::read(path).ok()?;
    String::from_utf8(bytes).ok()
}

/// Short content hash standing in for a blob id in synthesized headers
fn pseudo_blob_id(content: &str) -> String {
    let digest = Sha256::digest(content.as_bytes());
    hex::encode(&digest[..4])[..7].to_string()
}
