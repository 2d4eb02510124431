//! Turns a directory-picking gesture into a flat list of `SourceFile`s.
//!
//! Three sources are supported, all normalized to the same shape: a native
//! picker handle tree ([`picker`]), a drag-and-drop entry tree ([`entries`])
//! and an OS-level recursive scan ([`scanner`]).

pub mod entries;
pub mod picker;
pub mod scanner;

use std::path::PathBuf;

use thiserror::Error;

pub use entries::{collect_dropped, DroppedEntry};
pub use picker::{
    files_from_directory, pick_directory, DirectoryHandle, DirectoryPicker, FileHandle,
    FsDirectoryHandle, HandleEntry,
};
pub use scanner::{DirectoryScanner, ScannedFile};

#[derive(Error, Debug)]
pub enum AcquireError {
    /// The user dismissed the picker. Not a failure worth showing.
    #[error("Directory selection was cancelled")]
    Cancelled,

    #[error("Failed to access '{path}': {source}")]
    Access {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory scan failed for '{path}': {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

impl AcquireError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, AcquireError::Cancelled)
    }

    /// Message for the user, or `None` when nothing should be shown.
    pub fn user_message(&self) -> Option<String> {
        if self.is_cancelled() {
            None
        } else {
            Some("Failed to access directory. Please try again.".to_string())
        }
    }
}

/// Joins a relative-path prefix and a segment with `/`.
pub(crate) fn join_relative(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", prefix, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancellation_has_no_user_message() {
        assert!(AcquireError::Cancelled.is_cancelled());
        assert!(AcquireError::Cancelled.user_message().is_none());
    }

    #[test]
    fn test_access_error_has_user_message() {
        let err = AcquireError::Access {
            path: PathBuf::from("/root/secret"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(!err.is_cancelled());
        assert!(err.user_message().unwrap().contains("Failed to access directory"));
    }

    #[test]
    fn test_join_relative() {
        assert_eq!(join_relative("", "a.txt"), "a.txt");
        assert_eq!(join_relative("docs/2024", "a.txt"), "docs/2024/a.txt");
    }
}
