//! Result exporter - turns the cutout into a named, downloadable file

use std::path::{Path, PathBuf};

use crate::constants::{EXPORT_EXTENSION, EXPORT_PREFIX};
use crate::models::RemovalResult;

/// A file ready to be written to the download directory
#[derive(Clone, Debug, PartialEq)]
pub struct Artifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Artifact {
    /// Write into `dir`, creating it if needed. Returns the full path.
    pub async fn save(&self, dir: &Path) -> std::io::Result<PathBuf> {
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(&self.file_name);
        tokio::fs::write(&path, &self.bytes).await?;
        Ok(path)
    }
}

/// `removed_bg_<basename>.png`, where the basename is everything before the
/// first `.` of the source name (`a.b.jpg` gives `removed_bg_a.png`).
pub fn artifact_file_name(source_name: &str) -> String {
    let base = source_name.split('.').next().unwrap_or_default();
    format!("{}{}.{}", EXPORT_PREFIX, base, EXPORT_EXTENSION)
}

/// Produce the artifact, or nothing when there is no result to export
pub fn export(result: Option<&RemovalResult>, source_name: &str) -> Option<Artifact> {
    let result = result?;
    Some(Artifact {
        file_name: artifact_file_name(source_name),
        bytes: result.bytes.clone(),
    })
}
