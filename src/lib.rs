//! apicommit - automates the per-API commit workflow for generated API clients.
//!
//! # Overview
//!
//! apicommit diffs newly generated discovery documents against the currently
//! committed ones to produce per-API commit summaries, then walks a manifest of
//! changed APIs and creates one commit per API whose summary file exists,
//! staging only that API's generated artifacts.

pub mod artifacts;
pub mod error;
pub mod manifest;
pub mod orchestrator;
pub mod summary;

// Re-export commonly used types
pub use artifacts::ArtifactLayout;
pub use error::{ManifestError, OrchestratorError, SummaryError, VcsError};
pub use manifest::ApiId;
pub use orchestrator::{CommitConfig, RunReport};
pub use summary::diff::ChangeType;
pub use summary::report::ApiReport;
