use std::fs::Metadata;
use std::path::Path;

use log::{debug, warn};

use crate::acquire::AcquireError;
use crate::pipeline::record::SourceFile;

/// An item from a drag-and-drop gesture: either a file or a directory whose
/// children have been read.
#[derive(Debug, Clone)]
pub enum DroppedEntry {
    File(SourceFile),
    Directory {
        name: String,
        children: Vec<DroppedEntry>,
    },
}

impl DroppedEntry {
    pub fn name(&self) -> &str {
        match self {
            DroppedEntry::File(file) => &file.name,
            DroppedEntry::Directory { name, .. } => name,
        }
    }

    /// Builds the entry tree for a dropped path. File contents are not read;
    /// each file becomes a path-backed `SourceFile`.
    ///
    /// The dropped path itself may be a symlink. Symlinks found inside a
    /// dropped directory are skipped.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, AcquireError> {
        let path = path.as_ref();
        let metadata = path.metadata().map_err(|e| access_error(path, e))?;
        Self::from_metadata(path, &metadata)
    }

    fn from_metadata(path: &Path, metadata: &Metadata) -> Result<Self, AcquireError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        if !metadata.is_dir() {
            return Ok(DroppedEntry::File(SourceFile::from_path(
                name,
                path,
                metadata.len(),
            )));
        }

        let mut dir_entries = std::fs::read_dir(path)
            .map_err(|e| access_error(path, e))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| access_error(path, e))?;
        dir_entries.sort_by_key(|e| e.file_name());

        let mut children = Vec::with_capacity(dir_entries.len());
        for entry in dir_entries {
            let child = entry.path();
            let child_metadata =
                std::fs::symlink_metadata(&child).map_err(|e| access_error(&child, e))?;
            if child_metadata.file_type().is_symlink() {
                warn!("Skipping symlink {}", child.display());
                continue;
            }
            children.push(Self::from_metadata(&child, &child_metadata)?);
        }
        Ok(DroppedEntry::Directory { name, children })
    }
}

fn access_error(path: &Path, source: std::io::Error) -> AcquireError {
    AcquireError::Access {
        path: path.to_path_buf(),
        source,
    }
}

/// Flattens dropped entries into files whose relative paths are the names of
/// their enclosing dropped directories joined with `/`.
pub fn collect_dropped(entries: Vec<DroppedEntry>) -> Vec<SourceFile> {
    let mut files = Vec::new();
    for entry in entries {
        collect_entry(entry, "", &mut files);
    }
    debug!("Collected {} dropped files", files.len());
    files
}

fn collect_entry(entry: DroppedEntry, prefix: &str, files: &mut Vec<SourceFile>) {
    match entry {
        DroppedEntry::File(file) => {
            let relative = format!("{}{}", prefix, file.name);
            files.push(file.with_relative_path(relative));
        }
        DroppedEntry::Directory { name, children } => {
            let child_prefix = format!("{}{}/", prefix, name);
            for child in children {
                collect_entry(child, &child_prefix, files);
            }
        }
    }
}
