//! Client for the remote organization service that turns processed records
//! into a categorized folder structure.

pub mod client;
pub mod error;
pub mod types;

pub use client::AnalysisClient;
pub use error::AnalyzeError;
pub use types::{
    AnalyzeRequest, AnalyzeResponse, CollectionSummary, HealthStatus, OrganizedFile,
    OrganizedStructure,
};
