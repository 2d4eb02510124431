use std::sync::Arc;

use crate::error::ProcessError;
use crate::processor::ocr::OcrEngine;
use crate::processor::{DocumentFormat, Extractor};

pub struct ImageExtractor {
    ocr: Arc<dyn OcrEngine>,
}

impl ImageExtractor {
    pub fn new(ocr: Arc<dyn OcrEngine>) -> Self {
        Self { ocr }
    }

    pub fn ocr_enabled(&self) -> bool {
        self.ocr.is_enabled()
    }
}

impl Extractor for ImageExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ProcessError> {
        let _span = tracing::info_span!("extractor.image", bytes = bytes.len()).entered();

        if bytes.is_empty() {
            return Err(ProcessError::ImageProcessing("Image is empty".to_string()));
        }

        let text = self.ocr.recognize(bytes)?;
        Ok(text.trim().to_string())
    }

    fn supports(&self, format: DocumentFormat) -> bool {
        matches!(format, DocumentFormat::Image)
    }
}
