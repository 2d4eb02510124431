use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::{debug, info_span, warn};

use crate::config::IngestConfig;
use crate::error::ProcessError;
use crate::processor::{is_eligible, select_extractor, DocumentFormat, ExtractorRegistry};

use super::record::{ProcessedRecord, SourceFile};

/// Turns one `SourceFile` into one `ProcessedRecord`. Never fails: every
/// extraction problem ends up either in the log or in `record.error`.
pub struct FileProcessor {
    policy: Arc<IngestConfig>,
    registry: ExtractorRegistry,
}

impl FileProcessor {
    pub fn new(policy: Arc<IngestConfig>) -> Self {
        let registry = ExtractorRegistry::new(&policy);
        Self { policy, registry }
    }

    pub fn with_registry(policy: Arc<IngestConfig>, registry: ExtractorRegistry) -> Self {
        Self { policy, registry }
    }

    pub fn policy(&self) -> &IngestConfig {
        &self.policy
    }

    /// Consumes the file. Its contents are only read once an extractor has
    /// been selected, and the buffer is dropped before the record is returned.
    pub fn process(&self, file: SourceFile) -> ProcessedRecord {
        let mut record = ProcessedRecord::from_source(&file);
        let _span = info_span!("process_file", id = %record.id, name = %record.name).entered();

        if !is_eligible(&file.name, &file.declared_type) {
            debug!(declared_type = %file.declared_type, "Not eligible for extraction");
            return record;
        }

        let Some(format) =
            select_extractor(&file.name, &file.declared_type, file.size(), &self.policy)
        else {
            debug!(size = file.size(), "Extraction skipped by policy");
            return record;
        };

        let outcome = file
            .into_bytes()
            .map_err(|e| ProcessError::ReadFailed(e.to_string()))
            .and_then(|bytes| self.run_extractor(format, &bytes));

        match outcome {
            Ok(text) => {
                record.extracted_text = Some(truncate_chars(&text, self.policy.text_cap_chars));
            }
            Err(e) if e.is_format_error() && !self.policy.surface_extraction_errors => {
                warn!(format = %format, "Extraction failed: {}", e);
            }
            Err(e) => {
                warn!(format = %format, "Extraction failed, recording error: {}", e);
                record.error = Some(e.to_string());
            }
        }

        record
    }

    fn run_extractor(&self, format: DocumentFormat, bytes: &[u8]) -> Result<String, ProcessError> {
        panic::catch_unwind(AssertUnwindSafe(|| self.registry.extract(format, bytes)))
            .unwrap_or_else(|payload| Err(ProcessError::Panicked(panic_message(payload.as_ref()))))
    }
}

/// First `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
