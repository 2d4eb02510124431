use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

const KIB: u64 = 1024;
const MIB: u64 = 1024 * KIB;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Extraction and batching policy for the ingestion pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestConfig {
    /// Files dispatched concurrently per group; progress is reported per group.
    #[serde(default = "default_group_size")]
    pub group_size: usize,
    /// Hard ceiling on any record's extracted text, in characters.
    #[serde(default = "default_text_cap")]
    pub text_cap_chars: usize,
    #[serde(default = "default_pdf_page_ceiling")]
    pub pdf_page_ceiling: u32,
    /// PDF parsing stops once this many characters have been collected.
    #[serde(default = "default_text_cap")]
    pub pdf_soft_limit_chars: usize,
    #[serde(default = "default_pdf_size_ceiling")]
    pub pdf_size_ceiling_bytes: u64,
    #[serde(default = "default_word_size_ceiling")]
    pub word_size_ceiling_bytes: u64,
    #[serde(default = "default_text_size_ceiling")]
    pub text_size_ceiling_bytes: u64,
    #[serde(default = "default_image_size_ceiling")]
    pub image_size_ceiling_bytes: u64,
    #[serde(default)]
    pub ocr_enabled: bool,
    #[serde(default = "default_languages")]
    pub ocr_languages: Vec<String>,
    /// Put extractor failures into `record.error` instead of only logging them.
    #[serde(default)]
    pub surface_extraction_errors: bool,
}

fn default_group_size() -> usize {
    10
}

fn default_text_cap() -> usize {
    2000
}

fn default_pdf_page_ceiling() -> u32 {
    3
}

fn default_pdf_size_ceiling() -> u64 {
    10 * MIB
}

fn default_word_size_ceiling() -> u64 {
    5 * MIB
}

fn default_text_size_ceiling() -> u64 {
    MIB
}

fn default_image_size_ceiling() -> u64 {
    2 * MIB
}

fn default_languages() -> Vec<String> {
    vec!["eng".to_string()]
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            group_size: default_group_size(),
            text_cap_chars: default_text_cap(),
            pdf_page_ceiling: default_pdf_page_ceiling(),
            pdf_soft_limit_chars: default_text_cap(),
            pdf_size_ceiling_bytes: default_pdf_size_ceiling(),
            word_size_ceiling_bytes: default_word_size_ceiling(),
            text_size_ceiling_bytes: default_text_size_ceiling(),
            image_size_ceiling_bytes: default_image_size_ceiling(),
            ocr_enabled: false,
            ocr_languages: default_languages(),
            surface_extraction_errors: false,
        }
    }
}

/// Connection settings for the remote classification service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisConfig {
    #[serde(default = "default_api_url")]
    pub base_url: String,
    /// Whole-request timeout; large batches can take minutes server-side.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    300
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}
