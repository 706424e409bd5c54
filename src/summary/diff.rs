//! Key-level diffing of discovery documents.
//!
//! A discovery document is flattened to dotted key paths (nested objects only;
//! arrays and scalars are leaves), then the current and new versions are
//! compared key by key. Keys whose path contains boilerplate that churns on
//! every regeneration (descriptions, etags, revisions, URLs) are ignored.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::error::SummaryError;

/// How a key changed between the current and new document.
///
/// Ordering matters: verbose reports group deletions first, then additions,
/// then changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Deleted,
    Added,
    Changed,
}

/// One changed key in one discovery document.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct KeyChange {
    pub change: ChangeType,
    pub key: String,
}

/// All changes for one `<name>.<version>.json` discovery document.
#[derive(Debug, Clone, Serialize)]
pub struct FileDiff {
    pub name: String,
    pub version: String,
    pub changes: Vec<KeyChange>,
}

impl FileDiff {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Key substrings excluded from diffs (case-insensitive). These churn on
/// every regeneration without representing a surface change; `url` also
/// covers `rootUrl` and `baseUrl`.
const IGNORED_KEY_SUBSTRINGS: &[&str] = &[
    "description",
    "documentation",
    "enum",
    "etag",
    "revision",
    "title",
    "url",
];

/// Diff one discovery document between the current and new artifact dirs.
///
/// A document missing on either side diffs against empty, so a brand-new API
/// reports every key as added and a removed API reports every key as deleted.
pub fn diff_discovery_doc(
    current_dir: &Path,
    new_dir: &Path,
    filename: &str,
) -> Result<FileDiff, SummaryError> {
    let (name, version) = split_name_version(filename);

    let current = load_flattened(&current_dir.join(filename))?;
    let new = load_flattened(&new_dir.join(filename))?;

    let mut changes = Vec::new();

    for (key, current_value) in &current {
        if is_ignored(key) {
            continue;
        }
        match new.get(key) {
            None => changes.push(KeyChange {
                change: ChangeType::Deleted,
                key: key.clone(),
            }),
            Some(new_value) if new_value != current_value => changes.push(KeyChange {
                change: ChangeType::Changed,
                key: key.clone(),
            }),
            Some(_) => {}
        }
    }

    for key in new.keys() {
        if !is_ignored(key) && !current.contains_key(key) {
            changes.push(KeyChange {
                change: ChangeType::Added,
                key: key.clone(),
            });
        }
    }

    changes.sort();

    Ok(FileDiff {
        name,
        version,
        changes,
    })
}

/// `drive.v3.json` -> ("drive", "v3").
fn split_name_version(filename: &str) -> (String, String) {
    let mut parts = filename.split('.');
    let name = parts.next().unwrap_or(filename).to_string();
    let version = parts.next().unwrap_or("").to_string();
    (name, version)
}

fn is_ignored(key: &str) -> bool {
    let lower = key.to_lowercase();
    IGNORED_KEY_SUBSTRINGS.iter().any(|s| lower.contains(s))
}

/// Load a discovery document and flatten it to dotted key paths.
/// A missing file flattens to an empty map.
fn load_flattened(path: &Path) -> Result<BTreeMap<String, String>, SummaryError> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }

    let contents = fs::read_to_string(path).map_err(|source| SummaryError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    let doc: Value =
        serde_json::from_str(&contents).map_err(|source| SummaryError::ParseFailed {
            path: path.to_path_buf(),
            source,
        })?;

    let mut flat = BTreeMap::new();
    flatten(&doc, "", &mut flat);
    Ok(flat)
}

/// Recursively flatten nested objects; arrays and scalars become leaf values.
fn flatten(value: &Value, prefix: &str, out: &mut BTreeMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                let key = if prefix.is_empty() {
                    k.clone()
                } else {
                    format!("{prefix}.{k}")
                };
                flatten(v, &key, out);
            }
        }
        other => {
            out.insert(prefix.to_string(), other.to_string());
        }
    }
}
