//! Commit orchestration: one commit per changed API.
//!
//! Walks the changed-files manifest in order. For each API whose summary file
//! exists, stages that API's artifacts and creates a commit whose message is
//! the summary file's verbatim contents, optionally pushing afterwards. APIs
//! without a summary file are skipped silently.

pub mod executor;

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::artifacts::ArtifactLayout;
use crate::error::OrchestratorError;
use crate::manifest::{ApiId, read_manifest};

use self::executor::Vcs;

/// Configuration for one orchestrator run, derived from CLI flags.
pub struct CommitConfig {
    pub manifest: PathBuf,
    pub layout: ArtifactLayout,
    pub push: bool,
    pub remote: String,
    pub branch: String,
    /// Treat a missing summary file as a hard error instead of a skip.
    pub strict: bool,
}

impl Default for CommitConfig {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from("changed_files"),
            layout: ArtifactLayout::default(),
            push: false,
            remote: "origin".to_string(),
            branch: "master".to_string(),
            strict: false,
        }
    }
}

/// Per-API outcome tally for one run.
#[derive(Debug, Default)]
pub struct RunReport {
    pub committed: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<String>,
}

enum Outcome {
    Committed,
    NoSummary,
    NothingStaged,
}

/// Run the orchestrator over every API named in the manifest.
///
/// Each API is processed independently: a staging or commit failure for one
/// API is recorded and the batch continues (unless `strict` is set, which
/// aborts on the first failure). An empty manifest completes with an empty
/// report.
pub fn run(config: &CommitConfig, vcs: &impl Vcs) -> Result<RunReport, OrchestratorError> {
    let apis = read_manifest(&config.manifest)?;
    debug!("Manifest lists {} changed file(s)", apis.len());

    let mut report = RunReport::default();
    let mut seen: HashSet<String> = HashSet::new();

    for api in &apis {
        // At most one commit per API per run; later manifest lines for the
        // same API (e.g. drive.v2 after drive.v3) share one summary file.
        if !seen.insert(api.name.clone()) {
            debug!("Already processed {}, skipping {}", api.name, api.raw);
            continue;
        }

        match commit_one(config, vcs, api) {
            Ok(Outcome::Committed) => {
                println!("  [DONE] Committed {}", api.name);
                report.committed.push(api.name.clone());
            }
            Ok(Outcome::NoSummary) => {
                if config.strict {
                    return Err(OrchestratorError::SummaryMissing(
                        config.layout.summary_path(&api.name),
                    ));
                }
                debug!("No summary file for {}, skipping", api.name);
                println!("  [SKIP] {}: no summary file", api.name);
                report.skipped.push(api.name.clone());
            }
            Ok(Outcome::NothingStaged) => {
                println!("  [SKIP] {}: no staged changes", api.name);
                report.skipped.push(api.name.clone());
            }
            Err(e) if config.strict => return Err(e),
            Err(e) => {
                warn!("Failed to commit {}: {}", api.name, e);
                println!("  [FAIL] {}: {}", api.name, e);
                report.failed.push(api.name.clone());
            }
        }
    }

    Ok(report)
}

/// Process a single API: check the summary file, stage, commit, push.
fn commit_one(
    config: &CommitConfig,
    vcs: &impl Vcs,
    api: &ApiId,
) -> Result<Outcome, OrchestratorError> {
    let summary_path = config.layout.summary_path(&api.name);
    if !summary_path.exists() {
        return Ok(Outcome::NoSummary);
    }

    let message =
        fs::read_to_string(&summary_path).map_err(|source| OrchestratorError::SummaryRead {
            path: summary_path.clone(),
            source,
        })?;

    let patterns = config.layout.stage_patterns(&api.name);
    wrap(api, vcs.stage(&patterns))?;

    // Re-runs on an unchanged tree stage nothing; don't create empty commits.
    if !wrap(api, vcs.staged_changes())? {
        return Ok(Outcome::NothingStaged);
    }

    wrap(api, vcs.commit(&message))?;

    if config.push {
        wrap(api, vcs.push(&config.remote, &config.branch))?;
    }

    Ok(Outcome::Committed)
}

fn wrap<T>(api: &ApiId, result: Result<T, crate::error::VcsError>) -> Result<T, OrchestratorError> {
    result.map_err(|source| OrchestratorError::ApiFailed {
        api: api.name.clone(),
        source,
    })
}
