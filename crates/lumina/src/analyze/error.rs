use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Failures talking to the analysis service, classified the way the user
/// interface reports them.
#[derive(Error, Debug)]
pub enum AnalyzeError {
    /// The service could not be reached at all.
    #[error("Cannot reach analysis service at {base_url}: {message}")]
    Network { base_url: String, message: String },

    #[error("Request to analysis service timed out")]
    Timeout,

    #[error("Analysis service returned {status}: {detail}")]
    Server { status: u16, detail: String },

    #[error("Analysis service rejected the request ({status}): {detail}")]
    Client { status: u16, detail: String },

    #[error("Failed to decode analysis response: {0}")]
    Decode(String),

    #[error("Invalid analysis client configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

impl AnalyzeError {
    pub(crate) fn from_reqwest(err: reqwest::Error, base_url: &str) -> Self {
        if err.is_timeout() {
            AnalyzeError::Timeout
        } else if err.is_decode() {
            AnalyzeError::Decode(err.to_string())
        } else {
            AnalyzeError::Network {
                base_url: base_url.to_string(),
                message: err.to_string(),
            }
        }
    }

    /// Maps a non-success status and its body to an error.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let detail = extract_detail(body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        });

        if status.is_server_error() {
            AnalyzeError::Server {
                status: status.as_u16(),
                detail,
            }
        } else {
            AnalyzeError::Client {
                status: status.as_u16(),
                detail,
            }
        }
    }

    /// The message shown to the user for this failure category.
    pub fn user_message(&self) -> String {
        let prefix = "Failed to analyze files. ";
        match self {
            AnalyzeError::Network { base_url, .. } => format!(
                "{}Cannot connect to the backend server. Make sure the server is running on {}",
                prefix, base_url
            ),
            AnalyzeError::Server { detail, .. } => format!("{}Server error: {}", prefix, detail),
            AnalyzeError::Client { detail, .. } => format!("{}Bad request: {}", prefix, detail),
            AnalyzeError::Timeout => format!(
                "{}Request timed out. Try with fewer files or check your connection.",
                prefix
            ),
            AnalyzeError::Decode(msg) | AnalyzeError::InvalidConfig(msg) => {
                format!("{}{}", prefix, msg)
            }
        }
    }
}

/// Pulls the `detail` field out of an error body. Non-string details
/// (validation error lists) are rendered as compact JSON.
fn extract_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(s) if !s.is_empty() => Some(s),
        serde_json::Value::String(_) | serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}
