use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::acquire::AcquireError;
use crate::pipeline::record::{extension_of, generate_record_id, SourceFile};

/// One leaf file found by an OS-level scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannedFile {
    pub id: String,
    pub name: String,
    /// Path relative to the scan root, `/`-separated.
    pub path: String,
    pub full_path: PathBuf,
    /// Lower-cased extension, or `"unknown"`.
    #[serde(rename = "type")]
    pub file_type: String,
    pub size: u64,
}

impl ScannedFile {
    /// A path-backed `SourceFile`; contents are read only if extraction runs.
    pub fn to_source(&self) -> SourceFile {
        SourceFile::from_path(self.name.clone(), self.full_path.clone(), self.size)
            .with_relative_path(self.path.clone())
    }
}

/// Recursive scan of a local directory (privileged hosts only).
pub struct DirectoryScanner {
    root: PathBuf,
}

impl DirectoryScanner {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every leaf file under the root, sorted by path. Unreadable entries
    /// below the root are logged and skipped; an unreadable root is an error.
    pub fn scan(&self) -> Result<Vec<ScannedFile>, AcquireError> {
        let metadata = std::fs::metadata(&self.root).map_err(|e| AcquireError::Access {
            path: self.root.clone(),
            source: e,
        })?;
        if !metadata.is_dir() {
            return Err(AcquireError::NotADirectory(self.root.clone()));
        }

        let mut files = Vec::new();

        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(AcquireError::Scan {
                        path: self.root.clone(),
                        source: e,
                    });
                }
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", self.root.display(), e);
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                continue;
            }

            let size = match entry.metadata() {
                Ok(metadata) => metadata.len(),
                Err(e) => {
                    warn!("Skipping {}: {}", entry.path().display(), e);
                    continue;
                }
            };

            let name = entry.file_name().to_string_lossy().to_string();
            let file_type = match extension_of(&name) {
                ext if ext.is_empty() => "unknown".to_string(),
                ext => ext,
            };

            debug!("Found file: {}", entry.path().display());
            files.push(ScannedFile {
                id: generate_record_id(),
                path: relative_path(&self.root, entry.path()),
                full_path: entry.path().to_path_buf(),
                name,
                file_type,
                size,
            });
        }

        info!("Scanned {} files in {}", files.len(), self.root.display());
        Ok(files)
    }

    /// Scans and converts every file for the pipeline without reading any
    /// contents.
    pub fn scan_sources(&self) -> Result<Vec<SourceFile>, AcquireError> {
        Ok(self.scan()?.iter().map(ScannedFile::to_source).collect())
    }
}

fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
