use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::upload::{UploadPolicy, DEFAULT_MAPPING_FIELD};

/// Uploader configuration loaded from `~/.config/mapup/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploaderConfig {
    /// Ingestion endpoint receiving the multipart POST.
    pub endpoint: String,
    /// Ask the server to replace an existing mapping for the same build.
    pub overwrite: bool,
    /// Connect and read timeout per attempt, in milliseconds.
    pub request_timeout_ms: u64,
    /// Retries after the first attempt. Values above 5 are treated as 5.
    pub retry_count: u32,
    /// Abort (non-zero exit) when the upload does not succeed.
    pub fail_on_upload_error: bool,
    /// Form field name for the mapping file; `proguard` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapping_field: Option<String>,
}

impl Default for UploaderConfig {
    fn default() -> Self {
        let policy = UploadPolicy::default();
        Self {
            endpoint: policy.endpoint,
            overwrite: policy.overwrite,
            request_timeout_ms: policy.request_timeout.as_millis() as u64,
            retry_count: policy.retry_limit,
            fail_on_upload_error: policy.fail_on_error,
            mapping_field: None,
        }
    }
}

impl UploaderConfig {
    pub fn to_policy(&self) -> UploadPolicy {
        UploadPolicy {
            endpoint: self.endpoint.clone(),
            overwrite: self.overwrite,
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            retry_limit: self.retry_count,
            fail_on_error: self.fail_on_upload_error,
        }
    }

    pub fn mapping_field(&self) -> &str {
        self.mapping_field.as_deref().unwrap_or(DEFAULT_MAPPING_FIELD)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("mapup")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<UploaderConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = UploaderConfig::default();
        let toml = default_cfg.to_toml_string()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit path. Missing keys take defaults.
pub fn load_from(path: &Path) -> Result<UploaderConfig> {
    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: UploaderConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
