//! Rendering of per-API change reports.
//!
//! Each changed API gets a conventional-commit summary line plus a verbose
//! section listing every changed key, grouped per document version and change
//! type. The rendered report is the commit message the orchestrator later
//! commits with.

use std::fmt::Write;

use serde::Serialize;

use crate::summary::diff::{ChangeType, FileDiff};

/// The rendered change report for one API.
#[derive(Debug, Clone, Serialize)]
pub struct ApiReport {
    pub name: String,
    /// Conventional-commit summary line, e.g. `feat(drive)!: update the api`.
    pub summary: String,
    /// Key-level change listing, grouped by version and change type.
    pub verbose: String,
}

impl ApiReport {
    /// The full commit message: summary line, blank line, verbose section.
    pub fn message(&self) -> String {
        format!("{}\n\n{}", self.summary, self.verbose)
    }
}

/// Build one report per API from the per-document diffs.
///
/// Documents with no changes are dropped; APIs are ordered by name, versions
/// within an API by version string.
pub fn build_reports(diffs: &[FileDiff]) -> Vec<ApiReport> {
    let mut sorted: Vec<&FileDiff> = diffs.iter().filter(|d| !d.is_empty()).collect();
    sorted.sort_by(|a, b| (&a.name, &a.version).cmp(&(&b.name, &b.version)));

    let mut reports: Vec<ApiReport> = Vec::new();

    for diff in sorted {
        match reports.last_mut() {
            Some(report) if report.name == diff.name => {
                append_verbose(&mut report.verbose, diff);
            }
            _ => {
                let mut verbose = String::new();
                append_verbose(&mut verbose, diff);
                reports.push(ApiReport {
                    name: diff.name.clone(),
                    summary: String::new(),
                    verbose,
                });
            }
        }
    }

    // Aggregate the summary line across every version of the API.
    for report in &mut reports {
        let versions: Vec<&FileDiff> = diffs.iter().filter(|d| d.name == report.name).collect();
        let is_feature = versions.iter().any(|d| {
            d.changes
                .iter()
                .any(|c| matches!(c.change, ChangeType::Added | ChangeType::Deleted))
        });
        let is_breaking = versions
            .iter()
            .any(|d| d.changes.iter().any(|c| c.change == ChangeType::Deleted));
        report.summary = summary_line(&report.name, is_feature, is_breaking);
    }

    reports
}

/// Format the conventional-commit summary line for one API.
///
/// Any added or deleted key makes the change a `feat`; any deleted key marks
/// it breaking.
pub fn summary_line(name: &str, is_feature: bool, is_breaking: bool) -> String {
    let commit_type = if is_feature { "feat" } else { "fix" };
    let breaking_mark = if is_breaking { "!" } else { "" };
    format!("{commit_type}({name}){breaking_mark}: update the api")
}

fn append_verbose(out: &mut String, diff: &FileDiff) {
    if !out.is_empty() {
        out.push('\n');
    }
    let _ = writeln!(out, "#### {}:{}", diff.name, diff.version);

    let mut last_type: Option<ChangeType> = None;
    for change in &diff.changes {
        if last_type != Some(change.change) {
            let heading = match change.change {
                ChangeType::Deleted => "The following keys were deleted:",
                ChangeType::Added => "The following keys were added:",
                ChangeType::Changed => "The following keys were changed:",
            };
            let _ = writeln!(out, "\n{heading}");
            last_type = Some(change.change);
        }
        let _ = writeln!(out, "- {}", change.key);
    }
}
