//! Parsing of the changed-files manifest.
//!
//! The manifest is a newline-separated list of changed API identifiers, one
//! per line, in the form `<name>.<suffix>` (e.g. `drive.v3` or
//! `drive.v3.json`). Only the portion before the first `.` names the API;
//! the rest is carried along untouched.

use std::fs;
use std::path::Path;

use crate::error::ManifestError;

/// One manifest line: a changed API identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiId {
    /// The full identifier as it appeared in the manifest, minus any
    /// directory prefix (the generator writes `branch/<file>` style paths).
    pub raw: String,
    /// The API name: everything before the first `.`.
    pub name: String,
}

impl ApiId {
    /// Parse a single manifest line. Returns None for blank lines.
    pub fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }

        // Keep only the final path component.
        let raw = trimmed.rsplit('/').next().unwrap_or(trimmed).to_string();
        let name = raw.split('.').next().unwrap_or(&raw).to_string();

        Some(Self { raw, name })
    }
}

/// Read the manifest, preserving line order.
///
/// A missing or unreadable manifest is an error; an empty manifest is not
/// (the caller simply has nothing to do).
pub fn read_manifest(path: &Path) -> Result<Vec<ApiId>, ManifestError> {
    let contents = fs::read_to_string(path).map_err(|source| ManifestError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(contents.lines().filter_map(ApiId::parse).collect())
}
