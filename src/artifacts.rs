//! Layout of generated artifacts inside the client repository.
//!
//! Each API owns two artifact sets: discovery documents under
//! `googleapiclient/discovery_cache/documents/` and generated HTML docs under
//! `docs/dyn/`. The prepared commit message for an API lives at
//! `temp/<name>.verbose`.

use std::path::{Path, PathBuf};

/// Directory layout for generated artifacts, relative to the repository root.
#[derive(Debug, Clone)]
pub struct ArtifactLayout {
    pub discovery_dir: PathBuf,
    pub docs_dir: PathBuf,
    pub temp_dir: PathBuf,
}

impl Default for ArtifactLayout {
    fn default() -> Self {
        Self {
            discovery_dir: PathBuf::from("googleapiclient/discovery_cache/documents"),
            docs_dir: PathBuf::from("docs/dyn"),
            temp_dir: PathBuf::from("temp"),
        }
    }
}

impl ArtifactLayout {
    /// Path of the prepared commit message for one API.
    pub fn summary_path(&self, name: &str) -> PathBuf {
        self.temp_dir.join(format!("{name}.verbose"))
    }

    /// Pathspecs covering one API's artifacts, passed to the VCS for staging.
    ///
    /// `<docs-dir>/<name>_*` matches both the bare and `.html` doc files.
    pub fn stage_patterns(&self, name: &str) -> Vec<String> {
        vec![
            format!("{}/{}.*.json", display(&self.discovery_dir), name),
            format!("{}/{}_*", display(&self.docs_dir), name),
        ]
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}
