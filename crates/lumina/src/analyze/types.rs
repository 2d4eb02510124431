use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::pipeline::ProcessedRecord;

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeRequest<'a> {
    pub files: &'a [ProcessedRecord],
}

/// A file as the service returns it inside an organized structure.
/// Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizedFile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(rename = "type", default)]
    pub file_type: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// category -> subcategory -> folder -> files
pub type OrganizedStructure = BTreeMap<String, BTreeMap<String, BTreeMap<String, Vec<OrganizedFile>>>>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub collection_id: String,
    pub organized_structure: OrganizedStructure,
    pub total_files: usize,
    #[serde(default)]
    pub categories: Vec<String>,
    /// Only present on stored collections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl AnalyzeResponse {
    /// Number of files placed anywhere in the structure.
    pub fn placed_files(&self) -> usize {
        self.organized_structure
            .values()
            .flat_map(|subs| subs.values())
            .flat_map(|folders| folders.values())
            .map(Vec::len)
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// A stored collection as listed by the service, without its structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionSummary {
    pub collection_id: String,
    pub total_files: usize,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CollectionsResponse {
    pub collections: Vec<CollectionSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SearchResponse {
    pub results: Vec<OrganizedFile>,
}
