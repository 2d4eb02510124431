use std::path::{Path, PathBuf};

use crate::config::schema::Config;
use crate::error::ConfigError;

/// Overrides `analysis.baseUrl` when set.
pub const API_URL_ENV: &str = "LUMINA_API_URL";

const CONFIG_FILE_NAME: &str = "config.json";

/// `<platform config dir>/lumina/config.json`, if the platform has one.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("lumina").join(CONFIG_FILE_NAME))
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content)
}

/// Loads the config at `path` when given, otherwise the default location,
/// falling back to built-in defaults when no file exists there.
pub fn load_config_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
    if let Some(path) = path {
        return load_config(path);
    }

    match default_config_path() {
        Some(path) if path.exists() => load_config(path),
        _ => {
            let mut config = Config::default();
            apply_env_overrides(&mut config);
            validate_config(&config)?;
            Ok(config)
        }
    }
}

pub fn load_config_from_str(content: &str) -> Result<Config, ConfigError> {
    let mut config: Config = serde_json::from_str(content)?;

    apply_env_overrides(&mut config);
    validate_config(&config)?;

    Ok(config)
}

fn apply_env_overrides(config: &mut Config) {
    if let Ok(url) = std::env::var(API_URL_ENV) {
        if !url.trim().is_empty() {
            config.analysis.base_url = url.trim().to_string();
        }
    }
}

fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let ingest = &config.ingest;

    if ingest.group_size == 0 {
        return Err(ConfigError::Validation {
            message: "ingest.groupSize must be greater than 0".to_string(),
        });
    }

    if ingest.text_cap_chars == 0 {
        return Err(ConfigError::Validation {
            message: "ingest.textCapChars must be greater than 0".to_string(),
        });
    }

    if ingest.pdf_page_ceiling == 0 {
        return Err(ConfigError::Validation {
            message: "ingest.pdfPageCeiling must be greater than 0".to_string(),
        });
    }

    let url = config.analysis.base_url.as_str();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::Validation {
            message: format!("analysis.baseUrl must be an http(s) URL, got '{}'", url),
        });
    }

    Ok(())
}
