use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_RANDOM_LEN: usize = 9;

/// Where a file's contents come from.
///
/// Acquisition hands out `Path` sources so no file is read before the
/// coordinator has decided an extractor will actually run on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ByteSource {
    Memory(Vec<u8>),
    Path(PathBuf),
}

/// A file handed to the pipeline: metadata plus a way to get its contents.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    /// Path relative to the acquisition root, if the file came from a folder.
    pub relative_path: Option<String>,
    /// MIME type as declared by the host; empty when unknown.
    pub declared_type: String,
    pub source: ByteSource,
    size: u64,
}

impl SourceFile {
    /// Internal constructor used by all public constructors.
    fn new_internal(
        name: String,
        declared_type: Option<String>,
        source: ByteSource,
        size: u64,
    ) -> Self {
        let declared_type = declared_type
            .filter(|t| !t.is_empty())
            .or_else(|| Self::detect_mime_type(&name))
            .unwrap_or_default();
        Self {
            name,
            relative_path: None,
            declared_type,
            source,
            size,
        }
    }

    /// Creates an in-memory file whose media type is guessed from its name.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let size = bytes.len() as u64;
        Self::new_internal(name.into(), None, ByteSource::Memory(bytes), size)
    }

    /// Creates an in-memory file with an explicit declared media type.
    pub fn with_type(name: impl Into<String>, declared_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        let size = bytes.len() as u64;
        Self::new_internal(
            name.into(),
            Some(declared_type.into()),
            ByteSource::Memory(bytes),
            size,
        )
    }

    /// A file on disk that is only read when extraction runs. `size` comes
    /// from the caller's metadata lookup.
    pub fn from_path(name: impl Into<String>, path: impl Into<PathBuf>, size: u64) -> Self {
        Self::new_internal(name.into(), None, ByteSource::Path(path.into()), size)
    }

    pub fn with_relative_path(mut self, relative_path: impl Into<String>) -> Self {
        self.relative_path = Some(relative_path.into());
        self
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn is_in_memory(&self) -> bool {
        matches!(self.source, ByteSource::Memory(_))
    }

    /// Consumes the file and returns its contents, reading from disk if needed.
    pub fn into_bytes(self) -> std::io::Result<Vec<u8>> {
        match self.source {
            ByteSource::Memory(bytes) => Ok(bytes),
            ByteSource::Path(path) => std::fs::read(path),
        }
    }

    /// Lower-cased text after the last `.` in the name, or empty.
    pub fn extension(&self) -> String {
        extension_of(&self.name)
    }

    /// Detects MIME type from the file name using the mime_guess crate.
    /// Returns `None` for unknown extensions.
    fn detect_mime_type(name: &str) -> Option<String> {
        mime_guess::from_path(Path::new(name))
            .first()
            .map(|m| m.to_string())
    }
}

/// Lower-cased extension of a file name; empty when the name has no dot.
pub fn extension_of(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => String::new(),
    }
}

/// The normalized, bounded-text representation of one input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedRecord {
    pub id: String,
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub file_type: String,
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProcessedRecord {
    /// A record with metadata only: no extracted text, no error.
    pub fn from_source(file: &SourceFile) -> Self {
        Self {
            id: generate_record_id(),
            name: file.name.clone(),
            path: file
                .relative_path
                .clone()
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| file.name.clone()),
            file_type: file.extension(),
            size: file.size(),
            extracted_text: None,
            error: None,
        }
    }
}

/// `<unix millis>-<9 random base36 chars>`.
///
/// Unique within a batch in practice, but there is no collision check, so
/// these ids must not be used as durable keys.
pub fn generate_record_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let mut random = uuid::Uuid::new_v4().as_u128();
    let mut suffix = String::with_capacity(ID_RANDOM_LEN);
    for _ in 0..ID_RANDOM_LEN {
        let digit = (random % ID_ALPHABET.len() as u128) as usize;
        suffix.push(ID_ALPHABET[digit] as char);
        random /= ID_ALPHABET.len() as u128;
    }
    format!("{}-{}", millis, suffix)
}
