use crate::error::ProcessError;
use crate::processor::{DocumentFormat, Extractor};

/// Decodes bytes as UTF-8 (lossily) and keeps the first `max_chars` characters.
pub struct TextExtractor {
    max_chars: usize,
}

impl TextExtractor {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new(2000)
    }
}

impl Extractor for TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ProcessError> {
        let text = String::from_utf8_lossy(bytes);
        Ok(text.chars().take(self.max_chars).collect())
    }

    fn supports(&self, format: DocumentFormat) -> bool {
        matches!(format, DocumentFormat::Text)
    }
}
