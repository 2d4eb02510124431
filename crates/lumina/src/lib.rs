//! Ingestion side of an AI-driven folder organizer.
//!
//! A batch of user files is acquired from a directory ([`acquire`]), each file
//! is turned into a [`ProcessedRecord`] carrying a bounded amount of extracted
//! text ([`pipeline`], [`processor`]), and the records are handed to a remote
//! organization service ([`analyze`]).

pub mod acquire;
pub mod analyze;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod processor;
pub mod telemetry;

pub use acquire::{AcquireError, DirectoryScanner, DroppedEntry, ScannedFile};
pub use analyze::{AnalysisClient, AnalyzeError, AnalyzeResponse, OrganizedStructure};
pub use config::{load_config, load_config_or_default, AnalysisConfig, Config, IngestConfig};
pub use error::{ConfigError, LuminaError, ProcessError, Result};
pub use pipeline::{
    process_files, BatchPipeline, FileProcessor, PipelineError, ProcessedRecord, ProgressEvent,
    ProgressReporter, SourceFile,
};
pub use processor::{is_eligible, select_extractor, DocumentFormat};
