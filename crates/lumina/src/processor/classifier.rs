//! Maps a file's name and declared media type to an extraction strategy.
//!
//! Eligibility and extractor selection are separate questions: an image is
//! eligible for extraction but only gets an extractor when OCR is enabled.
//! Everything here is a pure function of name, declared type and size.

use crate::config::IngestConfig;
use crate::pipeline::record::extension_of;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const TEXT_EXTENSIONS: &[&str] = &[
    "txt", "md", "json", "xml", "html", "css", "js", "ts", "jsx", "tsx", "py", "java", "cpp", "c",
    "h", "go", "rs", "php", "rb", "swift", "yaml", "yml", "toml", "ini", "conf", "log", "csv",
    "sql",
];

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "tiff", "webp"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Text,
    Image,
}

impl DocumentFormat {
    /// First match wins: PDF, Word, text-like, image.
    pub fn detect(name: &str, declared_type: &str) -> Option<Self> {
        let ext = extension_of(name);
        let declared = declared_type.to_ascii_lowercase();

        if declared == PDF_MIME || ext == "pdf" {
            Some(Self::Pdf)
        } else if declared == DOCX_MIME || ext == "docx" {
            Some(Self::Docx)
        } else if declared.starts_with("text/") || TEXT_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Text)
        } else if declared.starts_with("image/") || IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Image)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Text => "text",
            Self::Image => "image",
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether any extraction should be attempted for this file.
pub fn is_eligible(name: &str, declared_type: &str) -> bool {
    DocumentFormat::detect(name, declared_type).is_some()
}

/// Picks the extractor for a file, applying the per-format size ceilings.
///
/// Returns `None` for policy skips: unsupported type, file over its ceiling,
/// or an image while OCR is disabled.
pub fn select_extractor(
    name: &str,
    declared_type: &str,
    size: u64,
    policy: &IngestConfig,
) -> Option<DocumentFormat> {
    let format = DocumentFormat::detect(name, declared_type)?;

    let allowed = match format {
        DocumentFormat::Pdf => size < policy.pdf_size_ceiling_bytes,
        DocumentFormat::Docx => size < policy.word_size_ceiling_bytes,
        DocumentFormat::Text => size < policy.text_size_ceiling_bytes,
        DocumentFormat::Image => policy.ocr_enabled && size < policy.image_size_ceiling_bytes,
    };

    allowed.then_some(format)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> IngestConfig {
        IngestConfig::default()
    }

    #[test]
    fn test_detect_by_declared_type() {
        assert_eq!(
            DocumentFormat::detect("file", PDF_MIME),
            Some(DocumentFormat::Pdf)
        );
        assert_eq!(
            DocumentFormat::detect("file", DOCX_MIME),
            Some(DocumentFormat::Docx)
        );
        assert_eq!(
            DocumentFormat::detect("file", "text/csv"),
            Some(DocumentFormat::Text)
        );
        assert_eq!(
            DocumentFormat::detect("file", "image/heic"),
            Some(DocumentFormat::Image)
        );
    }

    #[test]
    fn test_detect_by_extension() {
        assert_eq!(
            DocumentFormat::detect("report.PDF", ""),
            Some(DocumentFormat::Pdf)
        );
        assert_eq!(
            DocumentFormat::detect("letter.docx", ""),
            Some(DocumentFormat::Docx)
        );
        assert_eq!(
            DocumentFormat::detect("main.rs", ""),
            Some(DocumentFormat::Text)
        );
        assert_eq!(
            DocumentFormat::detect("photo.jpeg", ""),
            Some(DocumentFormat::Image)
        );
    }

    #[test]
    fn test_text_extension_beats_misleading_declared_type() {
        // mime_guess reports .ts as an MPEG transport stream
        assert_eq!(
            DocumentFormat::detect("index.ts", "video/mp2t"),
            Some(DocumentFormat::Text)
        );
    }

    #[test]
    fn test_unrecognized_not_eligible() {
        assert!(!is_eligible("blob.bin", "application/octet-stream"));
        assert!(!is_eligible("Makefile", ""));
        assert!(!is_eligible("slides.pptx", ""));
    }

    #[test]
    fn test_images_eligible_but_not_selected_without_ocr() {
        assert!(is_eligible("scan.png", "image/png"));
        assert_eq!(select_extractor("scan.png", "image/png", 10, &policy()), None);

        let mut with_ocr = policy();
        with_ocr.ocr_enabled = true;
        assert_eq!(
            select_extractor("scan.png", "image/png", 10, &with_ocr),
            Some(DocumentFormat::Image)
        );
        assert_eq!(
            select_extractor("scan.png", "image/png", 3 * 1024 * 1024, &with_ocr),
            None
        );
    }

    #[test]
    fn test_size_ceilings() {
        let p = policy();
        assert_eq!(
            select_extractor("a.txt", "text/plain", p.text_size_ceiling_bytes - 1, &p),
            Some(DocumentFormat::Text)
        );
        assert_eq!(
            select_extractor("a.txt", "text/plain", p.text_size_ceiling_bytes, &p),
            None
        );
        assert_eq!(
            select_extractor("a.pdf", PDF_MIME, p.pdf_size_ceiling_bytes + 1, &p),
            None
        );
        assert_eq!(
            select_extractor("a.docx", "", p.word_size_ceiling_bytes, &p),
            None
        );
        assert_eq!(
            select_extractor("a.docx", "", 1024, &p),
            Some(DocumentFormat::Docx)
        );
    }
}
