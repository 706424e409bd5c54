//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use git2::{Oid, Repository, Signature};

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new git repository in a temp directory with one initial commit.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        let test_repo = Self { dir, repo };
        test_repo.write_file("README.md", "generated client repository\n");
        test_repo.commit_all("chore: initial commit");
        test_repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Get the test signature for commits.
    fn signature(&self) -> Signature<'_> {
        Signature::now("Test User", "test@example.com").expect("Failed to create signature")
    }

    /// Write a file (creating parent directories) relative to the repo root.
    pub fn write_file(&self, relative: &str, contents: &str) {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&path, contents).expect("Failed to write file");
    }

    /// Stage everything and commit. Returns the commit OID.
    pub fn commit_all(&self, message: &str) -> Oid {
        let sig = self.signature();

        let mut index = self.repo.index().expect("Failed to get index");
        index
            .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
            .expect("Failed to stage files");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Number of commits reachable from HEAD.
    pub fn commit_count(&self) -> usize {
        let mut revwalk = self.repo.revwalk().expect("Failed to create revwalk");
        revwalk.push_head().expect("Failed to push HEAD");
        revwalk.count()
    }

    /// Message of the HEAD commit.
    pub fn head_message(&self) -> String {
        let head = self
            .repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .expect("Failed to resolve HEAD");
        head.message().unwrap_or("").to_string()
    }

    /// Paths touched by the HEAD commit, relative to the repo root.
    pub fn head_changed_paths(&self) -> Vec<PathBuf> {
        let head = self
            .repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .expect("Failed to resolve HEAD");
        let tree = head.tree().expect("Failed to get HEAD tree");
        let parent_tree = head.parent(0).ok().map(|p| p.tree().expect("parent tree"));

        let diff = self
            .repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)
            .expect("Failed to diff trees");

        let mut paths: Vec<PathBuf> = diff
            .deltas()
            .filter_map(|d| d.new_file().path().map(PathBuf::from))
            .collect();
        paths.sort();
        paths
    }
}
