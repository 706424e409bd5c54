//! Change-summary generation for discovery artifacts.
//!
//! Compares the newly generated artifact directory against the currently
//! committed one, one document per manifest line, and writes each changed
//! API's commit message to `<temp-dir>/<name>.verbose` for the orchestrator
//! to pick up.

pub mod diff;
pub mod report;

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use tracing::debug;

use crate::error::SummaryError;
use crate::manifest::read_manifest;

use self::diff::{FileDiff, diff_discovery_doc};
use self::report::{ApiReport, build_reports};

/// Configuration for one summarize run, derived from CLI flags.
pub struct SummaryConfig {
    /// Directory holding the newly generated discovery documents.
    pub new_dir: PathBuf,
    /// Directory holding the currently committed discovery documents.
    pub current_dir: PathBuf,
    /// Manifest naming the documents to compare.
    pub manifest: PathBuf,
    /// Where the per-API `.verbose` files are written.
    pub temp_dir: PathBuf,
}

/// Diff every document in the manifest and write per-API summary files.
///
/// Returns the reports in API-name order so the caller can print them.
pub fn run(config: &SummaryConfig) -> Result<Vec<ApiReport>, SummaryError> {
    for dir in [&config.new_dir, &config.current_dir] {
        if !dir.exists() {
            return Err(SummaryError::ArtifactsDirMissing(dir.clone()));
        }
    }

    let apis = read_manifest(&config.manifest)?;
    if apis.is_empty() {
        return Err(SummaryError::EmptyFileList);
    }

    let mut diffs: Vec<FileDiff> = Vec::new();
    for api in &apis {
        let filename = document_filename(&api.raw);
        debug!("Diffing {}", filename);
        diffs.push(diff_discovery_doc(
            &config.current_dir,
            &config.new_dir,
            &filename,
        )?);
    }

    let reports = build_reports(&diffs);

    fs::create_dir_all(&config.temp_dir).map_err(|source| SummaryError::WriteFailed {
        path: config.temp_dir.clone(),
        source,
    })?;

    for report in &reports {
        write_summary_file(config, report)?;
    }

    Ok(reports)
}

/// Manifest lines may name the document with or without the `.json` suffix.
fn document_filename(raw: &str) -> String {
    if raw.ends_with(".json") {
        raw.to_string()
    } else {
        format!("{raw}.json")
    }
}

/// Write one `.verbose` file atomically (write to a temp file, then rename).
fn write_summary_file(config: &SummaryConfig, report: &ApiReport) -> Result<(), SummaryError> {
    let path = config.temp_dir.join(format!("{}.verbose", report.name));
    let wrap = |source: std::io::Error| SummaryError::WriteFailed {
        path: path.clone(),
        source,
    };

    let mut file = tempfile::NamedTempFile::new_in(&config.temp_dir).map_err(wrap)?;
    file.write_all(report.message().as_bytes()).map_err(wrap)?;
    file.persist(&path).map_err(|e| wrap(e.error))?;

    debug!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (tempfile::TempDir, SummaryConfig) {
        let dir = tempfile::tempdir().unwrap();
        let config = SummaryConfig {
            new_dir: dir.path().join("branch"),
            current_dir: dir.path().join("main"),
            manifest: dir.path().join("branch/changed_files"),
            temp_dir: dir.path().join("temp"),
        };
        fs::create_dir_all(&config.new_dir).unwrap();
        fs::create_dir_all(&config.current_dir).unwrap();
        (dir, config)
    }

    #[test]
    fn test_run_writes_verbose_file_per_changed_api() {
        let (_dir, config) = setup();
        fs::write(
            config.current_dir.join("drive.v3.json"),
            r#"{"schemas": {"File": {"id": "File"}}}"#,
        )
        .unwrap();
        fs::write(
            config.new_dir.join("drive.v3.json"),
            r#"{"schemas": {"File": {"id": "File2"}}}"#,
        )
        .unwrap();
        fs::write(&config.manifest, "drive.v3.json\n").unwrap();

        let reports = run(&config).unwrap();
        assert_eq!(reports.len(), 1);

        let written = fs::read_to_string(config.temp_dir.join("drive.verbose")).unwrap();
        assert!(written.starts_with("fix(drive): update the api\n\n#### drive:v3\n"));
        assert!(written.contains("- schemas.File.id"));
    }

    #[test]
    fn test_run_skips_unchanged_api() {
        let (_dir, config) = setup();
        let doc = r#"{"schemas": {"File": {"id": "File"}}}"#;
        fs::write(config.current_dir.join("drive.v3.json"), doc).unwrap();
        fs::write(config.new_dir.join("drive.v3.json"), doc).unwrap();
        fs::write(&config.manifest, "drive.v3.json\n").unwrap();

        let reports = run(&config).unwrap();
        assert!(reports.is_empty());
        assert!(!config.temp_dir.join("drive.verbose").exists());
    }

    #[test]
    fn test_run_missing_artifacts_dir_is_an_error() {
        let (_dir, mut config) = setup();
        config.current_dir = config.current_dir.join("nope");

        assert!(matches!(
            run(&config),
            Err(SummaryError::ArtifactsDirMissing(_))
        ));
    }

    #[test]
    fn test_run_empty_manifest_is_an_error() {
        let (_dir, config) = setup();
        fs::write(&config.manifest, "").unwrap();

        assert!(matches!(run(&config), Err(SummaryError::EmptyFileList)));
    }

    #[test]
    fn test_manifest_entries_without_json_suffix() {
        let (_dir, config) = setup();
        fs::write(config.new_dir.join("drive.v3.json"), r#"{"id": "drive:v3"}"#).unwrap();
        fs::write(&config.manifest, "drive.v3\n").unwrap();

        let reports = run(&config).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].summary, "feat(drive): update the api");
    }
}
