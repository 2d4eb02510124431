use crate::error::ProcessError;
use crate::processor::{DocumentFormat, Extractor};

/// Reads embedded text from the first few pages of a PDF.
///
/// Only an excerpt is needed, so parsing stops at `page_ceiling` pages or
/// once `soft_limit_chars` characters have been collected, whichever comes
/// first.
pub struct PdfExtractor {
    page_ceiling: u32,
    soft_limit_chars: usize,
}

impl PdfExtractor {
    pub fn new(page_ceiling: u32, soft_limit_chars: usize) -> Self {
        Self {
            page_ceiling,
            soft_limit_chars,
        }
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new(3, 2000)
    }
}

impl Extractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ProcessError> {
        let _span = tracing::info_span!("extractor.pdf", bytes = bytes.len()).entered();

        let doc = lopdf::Document::load_mem(bytes)
            .map_err(|e| ProcessError::PdfProcessing(format!("Failed to load PDF: {}", e)))?;

        Ok(self.extract_pages(&doc))
    }

    fn supports(&self, format: DocumentFormat) -> bool {
        matches!(format, DocumentFormat::Pdf)
    }
}

impl PdfExtractor {
    fn extract_pages(&self, doc: &lopdf::Document) -> String {
        let mut text = String::new();
        let mut collected = 0usize;

        for page_num in doc.get_pages().into_keys().take(self.page_ceiling as usize) {
            match doc.extract_text(&[page_num]) {
                Ok(page_text) => {
                    let page_text = join_text_runs(&page_text);
                    if page_text.is_empty() {
                        continue;
                    }
                    collected += page_text.chars().count() + 1;
                    text.push_str(&page_text);
                    text.push('\n');
                }
                Err(e) => {
                    tracing::debug!(page = page_num, "Skipping unreadable PDF page: {}", e);
                }
            }

            if collected > self.soft_limit_chars {
                tracing::debug!(page = page_num, "PDF soft limit reached");
                break;
            }
        }

        text.trim().to_string()
    }
}

/// Collapses the text runs of one page into a single space-separated line.
fn join_text_runs(page_text: &str) -> String {
    page_text.split_whitespace().collect::<Vec<_>>().join(" ")
}
