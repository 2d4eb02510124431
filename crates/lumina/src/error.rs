use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LuminaError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Processing error: {0}")]
    Process(#[from] ProcessError),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] crate::pipeline::PipelineError),

    #[error("Acquisition error: {0}")]
    Acquire(#[from] crate::acquire::AcquireError),

    #[error("Analysis error: {0}")]
    Analyze(#[from] crate::analyze::AnalyzeError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },
}

/// Failures raised by a single extractor while parsing a file's bytes.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to process PDF: {0}")]
    PdfProcessing(String),

    #[error("Failed to process DOCX: {0}")]
    DocxProcessing(String),

    #[error("Failed to process image: {0}")]
    ImageProcessing(String),

    #[error("OCR failed: {0}")]
    OcrFailed(String),

    #[error("Failed to read file: {0}")]
    ReadFailed(String),

    #[error("Text extraction failed: {0}")]
    TextExtraction(String),

    #[error("Extraction panicked: {0}")]
    Panicked(String),
}

impl ProcessError {
    /// Parsing failures caused by the file's content rather than by a bug.
    pub fn is_format_error(&self) -> bool {
        !matches!(self, ProcessError::Panicked(_))
    }
}

pub type Result<T> = std::result::Result<T, LuminaError>;
