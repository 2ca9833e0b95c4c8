//! Tool execution context - scoped to one agent invocation

use std::path::{Path, PathBuf};

use crate::agent::approval::ApprovalFlag;

/// Execution context for tools.
///
/// Carries the project root all relative paths resolve against and the
/// invocation's own approval flag. Contexts are cheap to clone; each
/// concurrently executing round gets its own.
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// Project root - file operations and subprocesses run here
    project_root: PathBuf,

    /// Approval recorder for this execution context
    approval: ApprovalFlag,
}

impl ToolContext {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            approval: ApprovalFlag::new(),
        }
    }

    /// Context sharing an existing approval flag (reviewer rounds)
    pub fn with_approval(project_root: impl Into<PathBuf>, approval: ApprovalFlag) -> Self {
        Self {
            project_root: project_root.into(),
            approval,
        }
    }

    /// The project root path
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// This context's approval flag
    pub fn approval(&self) -> &ApprovalFlag {
        &self.approval
    }

    /// Resolve a possibly-relative path against the project root
    pub fn resolve(&self, path: &str) -> PathBuf {
        let p = Path::new(path);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.project_root.join(p)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_relative() {
        let dir = tempdir().unwrap();
        let ctx = ToolContext::new(dir.path());
        assert_eq!(ctx.resolve("sub/file.txt"), dir.path().join("sub/file.txt"));
    }

    #[test]
    fn test_resolve_absolute_passthrough() {
        let dir = tempdir().unwrap();
        let ctx = ToolContext::new(dir.path());
        assert_eq!(ctx.resolve("/tmp/x"), PathBuf::from("/tmp/x"));
    }

    #[test]
    fn test_each_context_owns_its_flag() {
        let dir = tempdir().unwrap();
        let a = ToolContext::new(dir.path());
        let b = ToolContext::new(dir.path());

        a.approval().set();
        assert!(a.approval().is_set());
        assert!(!b.approval().is_set());
    }

    #[test]
    fn test_with_approval_shares_flag() {
        let dir = tempdir().unwrap();
        let flag = ApprovalFlag::new();
        let ctx = ToolContext::with_approval(dir.path(), flag.clone());

        ctx.approval().set();
        assert!(flag.is_set());
    }
}
