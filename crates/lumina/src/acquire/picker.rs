use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures_util::future::BoxFuture;
use log::{debug, info};

use crate::acquire::{join_relative, AcquireError};
use crate::pipeline::record::SourceFile;

/// A file inside a picked directory; contents are read on demand.
#[async_trait]
pub trait FileHandle: Send + Sync {
    fn name(&self) -> &str;

    async fn get_file(&self) -> Result<SourceFile, AcquireError>;
}

/// A directory obtained from a native picker.
#[async_trait]
pub trait DirectoryHandle: Send + Sync {
    fn name(&self) -> &str;

    async fn entries(&self) -> Result<Vec<HandleEntry>, AcquireError>;
}

pub enum HandleEntry {
    File(Box<dyn FileHandle>),
    Directory(Box<dyn DirectoryHandle>),
}

/// A native directory-picker capability.
#[async_trait]
pub trait DirectoryPicker: Send + Sync {
    /// `Ok(None)` means the user dismissed the picker.
    async fn pick(&self) -> Result<Option<Box<dyn DirectoryHandle>>, AcquireError>;
}

/// Opens the picker and materializes the chosen directory.
///
/// Cancellation is reported as [`AcquireError::Cancelled`] so callers can
/// tell it apart from access failures.
pub async fn pick_directory(picker: &dyn DirectoryPicker) -> Result<Vec<SourceFile>, AcquireError> {
    let handle = picker.pick().await?.ok_or(AcquireError::Cancelled)?;
    info!("Reading picked directory '{}'", handle.name());
    files_from_directory(handle.as_ref()).await
}

/// Recursively reads every file under `handle`. Relative paths start below
/// the handle itself.
pub async fn files_from_directory(
    handle: &dyn DirectoryHandle,
) -> Result<Vec<SourceFile>, AcquireError> {
    let mut files = Vec::new();
    collect(handle, String::new(), &mut files).await?;
    debug!("Materialized {} files from '{}'", files.len(), handle.name());
    Ok(files)
}

fn collect<'a>(
    handle: &'a dyn DirectoryHandle,
    prefix: String,
    files: &'a mut Vec<SourceFile>,
) -> BoxFuture<'a, Result<(), AcquireError>> {
    Box::pin(async move {
        for entry in handle.entries().await? {
            match entry {
                HandleEntry::File(file_handle) => {
                    let relative = join_relative(&prefix, file_handle.name());
                    let file = file_handle.get_file().await?;
                    files.push(file.with_relative_path(relative));
                }
                HandleEntry::Directory(dir_handle) => {
                    let child_prefix = join_relative(&prefix, dir_handle.name());
                    collect(dir_handle.as_ref(), child_prefix, files).await?;
                }
            }
        }
        Ok(())
    })
}

/// Handle over a directory on the local filesystem.
pub struct FsDirectoryHandle {
    path: PathBuf,
    name: String,
}

impl FsDirectoryHandle {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            name: display_name(&path),
            path,
        }
    }
}

#[async_trait]
impl DirectoryHandle for FsDirectoryHandle {
    fn name(&self) -> &str {
        &self.name
    }

    async fn entries(&self) -> Result<Vec<HandleEntry>, AcquireError> {
        let access = |e: std::io::Error| AcquireError::Access {
            path: self.path.clone(),
            source: e,
        };

        let mut read_dir = tokio::fs::read_dir(&self.path).await.map_err(access)?;
        let mut found = Vec::new();
        while let Some(entry) = read_dir.next_entry().await.map_err(access)? {
            let is_dir = entry.file_type().await.map_err(access)?.is_dir();
            found.push((entry.path(), is_dir));
        }
        found.sort();

        Ok(found
            .into_iter()
            .map(|(path, is_dir)| {
                if is_dir {
                    HandleEntry::Directory(Box::new(FsDirectoryHandle::new(path)))
                } else {
                    HandleEntry::File(Box::new(FsFileHandle::new(path)))
                }
            })
            .collect())
    }
}

pub struct FsFileHandle {
    path: PathBuf,
    name: String,
}

impl FsFileHandle {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            name: display_name(&path),
            path,
        }
    }
}

#[async_trait]
impl FileHandle for FsFileHandle {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get_file(&self) -> Result<SourceFile, AcquireError> {
        let metadata = tokio::fs::metadata(&self.path)
            .await
            .map_err(|e| AcquireError::Access {
                path: self.path.clone(),
                source: e,
            })?;
        Ok(SourceFile::from_path(
            self.name.clone(),
            self.path.clone(),
            metadata.len(),
        ))
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
