use thiserror::Error;

/// Batch-level failures. Per-file problems never show up here; these mean the
/// batch itself could not be completed.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Extraction task failed: {0}")]
    TaskFailed(String),

    #[error("Batch produced {actual} records for {expected} files")]
    RecordCountMismatch { expected: usize, actual: usize },

    #[error("Batch cancelled after {processed} of {total} files")]
    Cancelled { processed: usize, total: usize },
}
