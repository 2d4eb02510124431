//! Test harness for isolated directory-to-records runs.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use assert_fs::prelude::*;
use assert_fs::TempDir;

use lumina::pipeline::NoopProgress;
use lumina::{BatchPipeline, DirectoryScanner, IngestConfig, ProcessedRecord};

pub struct TestHarness {
    temp_dir: TempDir,
    config: IngestConfig,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_config(IngestConfig::default())
    }

    pub fn with_config(config: IngestConfig) -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
            config,
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `bytes` at `relative` below the root, creating parents.
    pub fn write(&self, relative: &str, bytes: &[u8]) -> PathBuf {
        let child = self.temp_dir.child(relative);
        child.write_binary(bytes).expect("Failed to write fixture");
        child.path().to_path_buf()
    }

    pub fn write_str(&self, relative: &str, content: &str) -> PathBuf {
        self.write(relative, content.as_bytes())
    }

    /// Scans the root and runs every file through the pipeline.
    pub async fn ingest(&self) -> Vec<ProcessedRecord> {
        let files = DirectoryScanner::new(self.root())
            .scan_sources()
            .expect("Failed to scan harness directory");

        BatchPipeline::new(Arc::new(self.config.clone()))
            .process_files(files, &NoopProgress)
            .await
            .expect("Pipeline failed")
    }
}
