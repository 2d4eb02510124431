pub mod coordinator;
pub mod error;
pub mod progress;
pub mod record;
pub mod runner;

pub use coordinator::{truncate_chars, FileProcessor};
pub use error::PipelineError;
pub use progress::{BroadcastProgress, FnProgress, NoopProgress, ProgressEvent, ProgressReporter};
pub use record::{generate_record_id, ProcessedRecord, SourceFile};
pub use runner::{process_files, BatchPipeline};
