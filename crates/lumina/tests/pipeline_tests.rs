//! Batch-level properties of the ingestion pipeline.

mod common;

use std::sync::{Arc, Mutex};

use common::*;
use lumina::pipeline::{BroadcastProgress, FnProgress, NoopProgress};
use lumina::{process_files, BatchPipeline, DirectoryScanner, IngestConfig, ProcessedRecord};

fn without_ids(records: &[ProcessedRecord]) -> Vec<ProcessedRecord> {
    records
        .iter()
        .cloned()
        .map(|mut r| {
            r.id.clear();
            r
        })
        .collect()
}

#[tokio::test]
async fn test_one_record_per_file_in_input_order() {
    let batch = mixed_batch();
    let names: Vec<String> = batch.iter().map(|f| f.name.clone()).collect();

    let records = process_files(batch, &NoopProgress).await.unwrap();

    assert_eq!(records.len(), names.len());
    for (record, name) in records.iter().zip(&names) {
        assert_eq!(&record.name, name);
    }
}

#[tokio::test]
async fn test_mixed_batch_outcomes() {
    let records = process_files(mixed_batch(), &NoopProgress).await.unwrap();

    assert_eq!(records[0].extracted_text.as_deref(), Some("hello world"));

    let pdf_text = records[1].extracted_text.as_deref().unwrap();
    assert!(pdf_text.contains("Invoice 2024-001"));
    assert!(pdf_text.contains("Total due 120 EUR"));

    assert_eq!(
        records[2].extracted_text.as_deref(),
        Some("Dear team\nThanks for the update")
    );

    // Image without OCR and unknown binary: metadata only
    for record in &records[3..5] {
        assert!(record.extracted_text.is_none(), "{} has text", record.name);
        assert!(record.error.is_none());
    }

    assert_eq!(records[5].extracted_text.as_ref().unwrap().chars().count(), 2000);

    // Corrupt PDF is contained
    assert!(records[6].extracted_text.is_none());
    assert!(records[6].error.is_none());
}

#[tokio::test]
async fn test_text_never_exceeds_cap() {
    let config = IngestConfig {
        text_cap_chars: 7,
        ..IngestConfig::default()
    };
    let records = BatchPipeline::new(Arc::new(config))
        .process_files(mixed_batch(), &NoopProgress)
        .await
        .unwrap();

    for record in &records {
        if let Some(text) = &record.extracted_text {
            assert!(text.chars().count() <= 7, "{}: {:?}", record.name, text);
        }
    }
}

#[tokio::test]
async fn test_errored_records_carry_no_text() {
    let config = IngestConfig {
        surface_extraction_errors: true,
        ..IngestConfig::default()
    };
    let records = BatchPipeline::new(Arc::new(config))
        .process_files(mixed_batch(), &NoopProgress)
        .await
        .unwrap();

    let errored: Vec<&ProcessedRecord> = records.iter().filter(|r| r.error.is_some()).collect();
    assert_eq!(errored.len(), 1);
    assert_eq!(errored[0].name, "broken.pdf");
    assert!(errored[0].extracted_text.is_none());
}

#[tokio::test]
async fn test_scanned_file_over_ceiling_is_never_read() {
    let config = IngestConfig {
        text_size_ceiling_bytes: 16,
        surface_extraction_errors: true,
        ..IngestConfig::default()
    };
    let harness = TestHarness::with_config(config.clone());
    harness.write_str("small.txt", "short note");
    let big = harness.write("big.txt", &[b'x'; 1024]);

    let files = DirectoryScanner::new(harness.root()).scan_sources().unwrap();
    // Any attempt to read the big file would now fail and surface an error
    std::fs::remove_file(&big).unwrap();

    let records = BatchPipeline::new(Arc::new(config))
        .process_files(files, &NoopProgress)
        .await
        .unwrap();

    let big_record = records.iter().find(|r| r.name == "big.txt").unwrap();
    assert_eq!(big_record.size, 1024);
    assert!(big_record.extracted_text.is_none());
    assert!(big_record.error.is_none());

    let small_record = records.iter().find(|r| r.name == "small.txt").unwrap();
    assert_eq!(small_record.extracted_text.as_deref(), Some("short note"));
}

#[tokio::test]
async fn test_reprocessing_is_idempotent_except_ids() {
    let first = process_files(mixed_batch(), &NoopProgress).await.unwrap();
    let second = process_files(mixed_batch(), &NoopProgress).await.unwrap();

    assert_eq!(without_ids(&first), without_ids(&second));
}

#[tokio::test]
async fn test_twenty_five_files_report_three_times() {
    let seen = Mutex::new(Vec::new());
    let progress = FnProgress(|done, total| seen.lock().unwrap().push((done, total)));

    let batch = BatchBuilder::new().numbered_texts(25).build();
    process_files(batch, &progress).await.unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![(10, 25), (20, 25), (25, 25)]);
}

#[tokio::test]
async fn test_broadcast_progress_subscribers() {
    let progress = BroadcastProgress::new(16);
    let mut receiver = progress.subscribe();

    let batch = BatchBuilder::new().numbered_texts(12).build();
    process_files(batch, &progress).await.unwrap();

    let first = receiver.recv().await.unwrap();
    let second = receiver.recv().await.unwrap();
    assert_eq!((first.done, first.total), (10, 12));
    assert_eq!((second.done, second.total), (12, 12));
    assert!(second.is_complete());
}

#[tokio::test]
async fn test_records_serialize_for_the_wire() {
    let batch = BatchBuilder::new().text("a.txt", "alpha").build();
    let records = process_files(batch, &NoopProgress).await.unwrap();

    let json = serde_json::to_value(&records).unwrap();
    let item = &json[0];
    assert_eq!(item["name"], "a.txt");
    assert_eq!(item["path"], "a.txt");
    assert_eq!(item["type"], "txt");
    assert_eq!(item["size"], 5);
    assert_eq!(item["extractedText"], "alpha");
    assert!(item.get("error").is_none());
}
