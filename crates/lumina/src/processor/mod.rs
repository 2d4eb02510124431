pub mod classifier;
pub mod docx;
pub mod image;
pub mod ocr;
pub mod pdf;
pub mod text;

use std::sync::Arc;

use crate::config::IngestConfig;
use crate::error::ProcessError;

pub use classifier::{is_eligible, select_extractor, DocumentFormat};

/// Turns a file's raw bytes into best-effort text.
///
/// Implementations report parse failures through `Err`; deciding whether a
/// failure is user-visible is left to the caller.
pub trait Extractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<String, ProcessError>;
    fn supports(&self, format: DocumentFormat) -> bool;
}

pub struct ExtractorRegistry {
    extractors: Vec<Box<dyn Extractor>>,
}

impl ExtractorRegistry {
    pub fn new(config: &IngestConfig) -> Self {
        let ocr = ocr::engine_for(config);
        Self::with_ocr_engine(config, ocr)
    }

    /// Builds the registry around a caller-supplied OCR strategy.
    pub fn with_ocr_engine(config: &IngestConfig, ocr: Arc<dyn ocr::OcrEngine>) -> Self {
        let extractors: Vec<Box<dyn Extractor>> = vec![
            Box::new(text::TextExtractor::new(config.text_cap_chars)),
            Box::new(pdf::PdfExtractor::new(
                config.pdf_page_ceiling,
                config.pdf_soft_limit_chars,
            )),
            Box::new(docx::DocxExtractor::new()),
            Box::new(image::ImageExtractor::new(ocr)),
        ];

        Self { extractors }
    }

    /// Registry over an explicit extractor list; earlier entries win.
    pub fn from_extractors(extractors: Vec<Box<dyn Extractor>>) -> Self {
        Self { extractors }
    }

    pub fn extract(&self, format: DocumentFormat, bytes: &[u8]) -> Result<String, ProcessError> {
        for extractor in &self.extractors {
            if extractor.supports(format) {
                return extractor.extract(bytes);
            }
        }

        Err(ProcessError::UnsupportedFormat(format.to_string()))
    }
}
