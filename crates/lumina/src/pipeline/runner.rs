use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{debug, info, info_span, Instrument};

use crate::config::IngestConfig;

use super::coordinator::FileProcessor;
use super::error::PipelineError;
use super::progress::{ProgressEvent, ProgressReporter};
use super::record::{ProcessedRecord, SourceFile};

/// Runs the single-file coordinator over a whole batch.
///
/// Files are dispatched in fixed-size groups: every file of a group is
/// extracted concurrently, groups run one after another. Output order always
/// matches input order, and progress is reported once per finished group.
pub struct BatchPipeline {
    processor: Arc<FileProcessor>,
    group_size: usize,
    cancelled: Option<Arc<AtomicBool>>,
}

impl BatchPipeline {
    /// Builds the coordinator from the policy.
    pub fn new(config: Arc<IngestConfig>) -> Self {
        let group_size = config.group_size.max(1);
        Self {
            processor: Arc::new(FileProcessor::new(config)),
            group_size,
            cancelled: None,
        }
    }

    /// Runs batches through an existing coordinator.
    pub fn with_processor(processor: FileProcessor) -> Self {
        let group_size = processor.policy().group_size.max(1);
        Self {
            processor: Arc::new(processor),
            group_size,
            cancelled: None,
        }
    }

    /// Stops the batch before the next group once `flag` is set. Groups
    /// already dispatched always run to completion.
    pub fn with_cancellation(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancelled = Some(flag);
        self
    }

    pub fn group_size(&self) -> usize {
        self.group_size
    }

    pub async fn process_files(
        &self,
        files: Vec<SourceFile>,
        progress: &dyn ProgressReporter,
    ) -> Result<Vec<ProcessedRecord>, PipelineError> {
        let total = files.len();
        let mut records = Vec::with_capacity(total);
        let mut remaining = files.into_iter();
        let mut group_index = 0usize;

        info!(total, group_size = self.group_size, "Processing batch");

        loop {
            let group: Vec<SourceFile> = remaining.by_ref().take(self.group_size).collect();
            if group.is_empty() {
                break;
            }

            if self.is_cancelled() {
                info!(processed = records.len(), total, "Batch cancelled");
                return Err(PipelineError::Cancelled {
                    processed: records.len(),
                    total,
                });
            }

            let span = info_span!("batch_group", group = group_index, files = group.len());
            let group_records = self.process_group(group).instrument(span).await?;
            records.extend(group_records);
            group_index += 1;

            debug!(done = records.len(), total, "Group finished");
            progress.report(ProgressEvent {
                done: records.len(),
                total,
            });
        }

        if records.len() != total {
            return Err(PipelineError::RecordCountMismatch {
                expected: total,
                actual: records.len(),
            });
        }

        info!(total, groups = group_index, "Batch complete");
        Ok(records)
    }

    /// Extracts one group on the blocking pool and gathers results positionally.
    async fn process_group(
        &self,
        group: Vec<SourceFile>,
    ) -> Result<Vec<ProcessedRecord>, PipelineError> {
        let tasks = group.into_iter().map(|file| {
            let processor = Arc::clone(&self.processor);
            tokio::task::spawn_blocking(move || processor.process(file))
        });

        join_all(tasks)
            .await
            .into_iter()
            .map(|joined| joined.map_err(|e| PipelineError::TaskFailed(e.to_string())))
            .collect()
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// Processes `files` with the default policy.
pub async fn process_files(
    files: Vec<SourceFile>,
    progress: &dyn ProgressReporter,
) -> Result<Vec<ProcessedRecord>, PipelineError> {
    BatchPipeline::new(Arc::new(IngestConfig::default()))
        .process_files(files, progress)
        .await
}
