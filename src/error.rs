//! Error types for apicommit modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from manifest parsing.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read manifest {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from version-control operations.
#[derive(Error, Debug)]
pub enum VcsError {
    #[error("Failed to run git {operation}: {source}")]
    SpawnFailed {
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("git {operation} failed: {stderr}")]
    CommandFailed {
        operation: &'static str,
        stderr: String,
    },
}

/// Errors from the commit orchestrator.
#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("Summary file does not exist: {0}")]
    SummaryMissing(PathBuf),

    #[error("Failed to read summary file {path}: {source}")]
    SummaryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to commit {api}: {source}")]
    ApiFailed {
        api: String,
        #[source]
        source: VcsError,
    },
}

/// Errors from change-summary generation.
#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("Artifacts directory does not exist: {0}")]
    ArtifactsDirMissing(PathBuf),

    #[error("File list must not be empty")]
    EmptyFileList,

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("Failed to read discovery document {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse discovery document {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write summary file {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
