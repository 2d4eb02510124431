//! Shared test utilities for lumina integration tests.
//!
//! - `TestHarness` owns a temporary input directory and runs the pipeline
//! - builders produce in-memory PDF, DOCX and text fixtures

pub mod builders;
pub mod harness;

pub use builders::*;
pub use harness::TestHarness;
