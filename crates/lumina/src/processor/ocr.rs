use std::sync::Arc;

use crate::config::IngestConfig;
use crate::error::ProcessError;

/// Recognizes text in image bytes.
///
/// The pipeline ships with OCR switched off for throughput; the trait stays
/// so a real engine can be swapped in through configuration alone.
pub trait OcrEngine: Send + Sync {
    fn recognize(&self, image: &[u8]) -> Result<String, ProcessError>;

    fn is_enabled(&self) -> bool;
}

/// Always recognizes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledOcr;

impl OcrEngine for DisabledOcr {
    fn recognize(&self, _image: &[u8]) -> Result<String, ProcessError> {
        Ok(String::new())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

/// Picks the OCR strategy for a policy.
pub fn engine_for(config: &IngestConfig) -> Arc<dyn OcrEngine> {
    if !config.ocr_enabled {
        return Arc::new(DisabledOcr);
    }

    #[cfg(feature = "ocr")]
    {
        Arc::new(tesseract::TesseractOcr::new(&config.ocr_languages))
    }

    #[cfg(not(feature = "ocr"))]
    {
        tracing::warn!("OCR requested but lumina was built without the `ocr` feature; images will not be read");
        Arc::new(DisabledOcr)
    }
}

#[cfg(feature = "ocr")]
pub mod tesseract {
    use std::io::Cursor;

    use super::OcrEngine;
    use crate::error::ProcessError;

    /// Tesseract via leptess. A fresh engine is created per image since
    /// `LepTess` is not `Sync`.
    #[derive(Debug, Clone)]
    pub struct TesseractOcr {
        languages: String,
    }

    impl TesseractOcr {
        pub fn new(languages: &[String]) -> Self {
            let languages = if languages.is_empty() {
                "eng".to_string()
            } else {
                languages.join("+")
            };
            Self { languages }
        }

        pub fn languages(&self) -> &str {
            &self.languages
        }
    }

    impl OcrEngine for TesseractOcr {
        fn recognize(&self, image_data: &[u8]) -> Result<String, ProcessError> {
            let _span = tracing::info_span!("extractor.ocr").entered();

            let img = image::load_from_memory(image_data)
                .map_err(|e| ProcessError::OcrFailed(format!("Failed to load image: {}", e)))?;

            // leptess only accepts encoded images; normalize to PNG
            let mut png_data = Vec::new();
            img.write_to(&mut Cursor::new(&mut png_data), image::ImageFormat::Png)
                .map_err(|e| ProcessError::OcrFailed(format!("Failed to convert image: {}", e)))?;

            let mut lt = leptess::LepTess::new(None, &self.languages).map_err(|e| {
                ProcessError::OcrFailed(format!("Failed to initialize Tesseract: {}", e))
            })?;

            lt.set_image_from_mem(&png_data).map_err(|e| {
                ProcessError::OcrFailed(format!("Failed to set image for OCR: {}", e))
            })?;

            lt.get_utf8_text()
                .map_err(|e| ProcessError::OcrFailed(format!("OCR failed: {}", e)))
        }

        fn is_enabled(&self) -> bool {
            true
        }
    }

}
