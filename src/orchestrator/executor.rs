//! Git operations behind a narrow seam: stage, commit, push.
//!
//! All mutating operations use `std::process::Command` to shell out to the
//! system `git` binary, inheriting the user's SSH agent and credential store.
//! The committer identity is injected per invocation with `-c user.name=...`
//! instead of touching global git config, so runs are isolated and testable.

use std::path::PathBuf;
use std::process::Command;

use crate::error::VcsError;

/// Committer identity used for every commit the orchestrator creates.
#[derive(Debug, Clone)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

impl Default for Identity {
    fn default() -> Self {
        Self {
            name: "Yoshi Automation".to_string(),
            email: "yoshi-automation@google.com".to_string(),
        }
    }
}

/// Version-control operations needed by the orchestrator.
///
/// This abstraction allows testing the orchestration loop against a mock
/// instead of a real repository.
#[cfg_attr(test, mockall::automock)]
pub trait Vcs {
    /// Stage everything matching the given pathspecs.
    fn stage(&self, patterns: &[String]) -> Result<(), VcsError>;

    /// Whether the index differs from HEAD.
    fn staged_changes(&self) -> Result<bool, VcsError>;

    /// Create a commit from the index with the given message.
    fn commit(&self, message: &str) -> Result<(), VcsError>;

    /// Push the current branch to the given remote.
    fn push(&self, remote: &str, branch: &str) -> Result<(), VcsError>;
}

/// [`Vcs`] implementation that runs the real git binary in a working directory.
pub struct GitCli {
    workdir: PathBuf,
    identity: Identity,
}

impl GitCli {
    pub fn new(workdir: PathBuf, identity: Identity) -> Self {
        Self { workdir, identity }
    }

    /// Run a git command in the working directory, with full output capture.
    fn run_git(&self, args: &[&str], operation: &'static str) -> Result<(), VcsError> {
        let output = Command::new("git")
            .current_dir(&self.workdir)
            .args(args)
            .output()
            .map_err(|source| VcsError::SpawnFailed { operation, source })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VcsError::CommandFailed {
                operation,
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(())
    }
}

impl Vcs for GitCli {
    fn stage(&self, patterns: &[String]) -> Result<(), VcsError> {
        let mut args = vec!["add", "--"];
        args.extend(patterns.iter().map(String::as_str));
        self.run_git(&args, "add")
    }

    fn staged_changes(&self) -> Result<bool, VcsError> {
        // `git diff --cached --quiet` exits 0 when the index matches HEAD
        // and 1 when there are staged changes.
        let status = Command::new("git")
            .current_dir(&self.workdir)
            .args(["diff", "--cached", "--quiet"])
            .status()
            .map_err(|source| VcsError::SpawnFailed {
                operation: "diff",
                source,
            })?;

        match status.code() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            code => Err(VcsError::CommandFailed {
                operation: "diff",
                stderr: format!("git diff --cached --quiet exited with {:?}", code),
            }),
        }
    }

    fn commit(&self, message: &str) -> Result<(), VcsError> {
        let name = format!("user.name={}", self.identity.name);
        let email = format!("user.email={}", self.identity.email);
        // Summary bodies contain `####` headings; pin the cleanup mode so a
        // commit.cleanup=strip config cannot drop them as comments.
        self.run_git(
            &[
                "-c",
                &name,
                "-c",
                &email,
                "commit",
                "--cleanup=whitespace",
                "-m",
                message,
            ],
            "commit",
        )
    }

    fn push(&self, remote: &str, branch: &str) -> Result<(), VcsError> {
        self.run_git(&["push", remote, branch], "push")
    }
}
