//! Directory acquisition through every supported source.

mod common;

use common::*;
use lumina::acquire::{collect_dropped, files_from_directory, FsDirectoryHandle};
use lumina::{AcquireError, DirectoryScanner, DroppedEntry};

fn relative_paths(files: &[lumina::SourceFile]) -> Vec<String> {
    files
        .iter()
        .map(|f| f.relative_path.clone().unwrap_or_default())
        .collect()
}

fn depth_three_tree() -> TestHarness {
    let harness = TestHarness::new();
    harness.write_str("readme.md", "# Projects");
    harness.write_str("work/reports/2024/q1.txt", "first quarter");
    harness.write_str("work/reports/2024/q2.txt", "second quarter");
    harness.write("work/scans/receipt.png", &[0x89, b'P', b'N', b'G']);
    harness
}

#[test]
fn test_scanner_flattens_nested_tree() {
    let harness = depth_three_tree();
    let files = DirectoryScanner::new(harness.root()).scan_sources().unwrap();

    assert_eq!(
        relative_paths(&files),
        vec![
            "readme.md",
            "work/reports/2024/q1.txt",
            "work/reports/2024/q2.txt",
            "work/scans/receipt.png",
        ]
    );
}

#[tokio::test]
async fn test_handle_and_scanner_agree() {
    let harness = depth_three_tree();

    let scanned = DirectoryScanner::new(harness.root()).scan_sources().unwrap();
    let handled = files_from_directory(&FsDirectoryHandle::new(harness.root()))
        .await
        .unwrap();

    assert_eq!(relative_paths(&scanned), relative_paths(&handled));
    for (a, b) in scanned.iter().zip(&handled) {
        assert_eq!(a.size(), b.size());
        assert_eq!(a.clone().into_bytes().unwrap(), b.clone().into_bytes().unwrap());
        assert_eq!(a.declared_type, b.declared_type);
    }
}

#[test]
fn test_dropped_folder_keeps_its_name() {
    let harness = depth_three_tree();
    let root_name = harness
        .root()
        .file_name()
        .unwrap()
        .to_string_lossy()
        .to_string();

    let entry = DroppedEntry::from_path(harness.root()).unwrap();
    let files = collect_dropped(vec![entry]);

    assert_eq!(files.len(), 4);
    assert_eq!(
        files[1].relative_path.as_deref(),
        Some(format!("{}/work/reports/2024/q1.txt", root_name).as_str())
    );
}

#[tokio::test]
async fn test_acquired_paths_flow_into_records() {
    let harness = depth_three_tree();
    let records = harness.ingest().await;

    assert_eq!(records.len(), 4);
    assert_eq!(records[1].path, "work/reports/2024/q1.txt");
    assert_eq!(records[1].extracted_text.as_deref(), Some("first quarter"));
    assert_eq!(records[3].file_type, "png");
    assert!(records[3].extracted_text.is_none());
}

#[test]
fn test_missing_directory_is_access_error() {
    let result = DirectoryScanner::new("/nonexistent/lumina/input").scan();
    match result {
        Err(e @ AcquireError::Access { .. }) => {
            assert!(!e.is_cancelled());
            assert_eq!(
                e.user_message().as_deref(),
                Some("Failed to access directory. Please try again.")
            );
        }
        other => panic!("Expected access error, got {:?}", other),
    }
}
