//! Local git operations via subprocess
//!
//! Thin wrapper over the `git` binary, scoped to one repository root.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Result, TandemError};

/// Handle to a local git repository.
#[derive(Debug, Clone)]
pub struct GitRepo {
    root: PathBuf,
}

impl GitRepo {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Repository root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run a git command and return trimmed stdout, mapping failures to Git errors
    fn git(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()
            .map_err(|e| TandemError::Git(format!("Failed to execute git: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TandemError::Git(format!(
                "git {} failed: {}",
                args.first().unwrap_or(&""),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim_end().to_string())
    }

    /// Initialize a new repository at the root (used by tests and bootstrap)
    pub fn init(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root)?;
        self.git(&["init", "--initial-branch=main"])?;
        Ok(())
    }

    /// Name of the currently checked-out branch
    pub fn current_branch(&self) -> Result<String> {
        self.git(&["rev-parse", "--abbrev-ref", "HEAD"])
    }

    /// List local branch names
    pub fn branches(&self) -> Result<Vec<String>> {
        let output = self.git(&["branch", "--format=%(refname:short)"])?;
        Ok(output.lines().map(|l| l.trim().to_string()).filter(|l| !l.is_empty()).collect())
    }

    /// Create a branch, or switch to it if it already exists.
    ///
    /// Returns true when a new branch was created, false when an existing
    /// one was adopted.
    pub fn create_or_switch_branch(&self, branch_name: &str) -> Result<bool> {
        if self.branches()?.iter().any(|b| b == branch_name) {
            self.git(&["checkout", branch_name])?;
            tracing::info!(branch = branch_name, "switched to existing branch");
            return Ok(false);
        }

        self.git(&["checkout", "-b", branch_name])?;
        tracing::info!(branch = branch_name, "created new branch");
        Ok(true)
    }

    /// Unified diff of the working tree against the last commit
    pub fn diff_working_tree(&self, scope: Option<&str>) -> Result<String> {
        let mut args = vec!["diff", "HEAD"];
        if let Some(path) = scope {
            args.push("--");
            args.push(path);
        }
        self.git(&args)
    }

    /// Unified diff of the staging area against the last commit
    pub fn diff_staged(&self, scope: Option<&str>) -> Result<String> {
        let mut args = vec!["diff", "--cached"];
        if let Some(path) = scope {
            args.push("--");
            args.push(path);
        }
        self.git(&args)
    }

    /// Untracked file paths, honoring ignore rules
    pub fn untracked_files(&self, scope: Option<&str>) -> Result<Vec<String>> {
        let mut args = vec!["ls-files", "--others", "--exclude-standard"];
        if let Some(path) = scope {
            args.push(path);
        }
        let output = self.git(&args)?;
        Ok(output.lines().map(|l| l.to_string()).filter(|l| !l.is_empty()).collect())
    }

    /// Paths changed relative to the last commit (tracked modifications)
    pub fn changed_files(&self, scope: Option<&str>) -> Result<Vec<String>> {
        let mut args = vec!["diff", "--name-only", "HEAD"];
        if let Some(path) = scope {
            args.push("--");
            args.push(path);
        }
        let output = self.git(&args)?;
        Ok(output.lines().map(|l| l.to_string()).filter(|l| !l.is_empty()).collect())
    }

    /// Stage the given paths, commit, and push to the remote branch.
    pub fn commit_and_push(&self, branch: &str, paths: &[String], message: &str) -> Result<()> {
        if paths.is_empty() {
            return Err(TandemError::Git("no files to commit".to_string()));
        }

        let mut add_args = vec!["add", "--"];
        add_args.extend(paths.iter().map(|p| p.as_str()));
        self.git(&add_args)?;

        self.git(&["commit", "-m", message])?;
        self.git(&["push", "-u", "origin", branch])?;
        tracing::info!(branch, files = paths.len(), "committed and pushed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn init_repo(dir: &Path) -> GitRepo {
        let repo = GitRepo::new(dir);
        repo.init().unwrap();
        repo.git(&["config", "user.email", "test@example.com"]).unwrap();
        repo.git(&["config", "user.name", "Test"]).unwrap();
        std::fs::write(dir.join("README.md"), "# test\n").unwrap();
        repo.git(&["add", "."]).unwrap();
        repo.git(&["commit", "-m", "initial"]).unwrap();
        repo
    }

    #[test]
    fn test_current_branch() {
        let dir = tempdir().unwrap();
        let repo = init_repo(dir.path());
        assert_eq!(repo.current_branch().unwrap(), "main");
    }

    #[test]
    fn test_create_branch_then_switch_back() {
        let dir = tempdir().unwrap();
        let repo = init_repo(dir.path());

        assert!(repo.create_or_switch_branch("feature/one").unwrap());
        assert_eq!(repo.current_branch().unwrap(), "feature/one");

        // Second call adopts the existing branch
        repo.git(&["checkout", "main"]).unwrap();
        assert!(!repo.create_or_switch_branch("feature/one").unwrap());
        assert_eq!(repo.current_branch().unwrap(), "feature/one");
    }

    #[test]
    fn test_diff_working_tree_detects_edit() {
        let dir = tempdir().unwrap();
        let repo = init_repo(dir.path());

        std::fs::write(dir.path().join("README.md"), "# changed\n").unwrap();
        let diff = repo.diff_working_tree(None).unwrap();
        assert!(diff.contains("-# test"));
        assert!(diff.contains("+# changed"));
    }

    #[test]
    fn test_untracked_files_listed() {
        let dir = tempdir().unwrap();
        let repo = init_repo(dir.path());

        std::fs::write(dir.path().join("new.txt"), "hello\n").unwrap();
        let untracked = repo.untracked_files(None).unwrap();
        assert_eq!(untracked, vec!["new.txt".to_string()]);
    }

    #[test]
    fn test_changed_files_scoped() {
        let dir = tempdir().unwrap();
        let repo = init_repo(dir.path());

        std::fs::create_dir_all(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub/file.txt"), "x\n").unwrap();
        repo.git(&["add", "."]).unwrap();
        repo.git(&["commit", "-m", "add sub"]).unwrap();

        std::fs::write(dir.path().join("README.md"), "# other\n").unwrap();
        std::fs::write(dir.path().join("sub/file.txt"), "y\n").unwrap();

        let all = repo.changed_files(None).unwrap();
        assert_eq!(all.len(), 2);

        let scoped = repo.changed_files(Some("sub")).unwrap();
        assert_eq!(scoped, vec!["sub/file.txt".to_string()]);
    }

    #[test]
    fn test_git_failure_maps_to_git_error() {
        let dir = tempdir().unwrap();
        // Not a repository: any git query fails
        let repo = GitRepo::new(dir.path());
        let result = repo.current_branch();
        assert!(matches!(result, Err(TandemError::Git(_))));
    }
}
