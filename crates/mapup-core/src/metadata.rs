//! Build metadata sent alongside the mapping file.
//!
//! Values arrive already resolved (from the build system, a manifest, or the
//! command line); this module only holds and loads them.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Identifies the build a mapping file belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadMetadata {
    /// API key of the receiving project. Empty means missing.
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub application_id: String,
    #[serde(default)]
    pub version_code: String,
    /// Build UUID injected into the app at build time.
    #[serde(default)]
    pub build_id: String,
    #[serde(default)]
    pub version_name: String,
}

impl UploadMetadata {
    /// Upload can only be attempted with a non-empty API key.
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Load metadata from a `.json` or `.toml` file. Anything not ending in
    /// `.json` is read as TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        let data =
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        let metadata = if is_json {
            serde_json::from_str(&data)
                .with_context(|| format!("parse metadata JSON {}", path.display()))?
        } else {
            toml::from_str(&data)
                .with_context(|| format!("parse metadata TOML {}", path.display()))?
        };
        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_api_key_is_missing() {
        let m = UploadMetadata::default();
        assert!(!m.has_api_key());
        let m = UploadMetadata {
            api_key: "abc".into(),
            ..UploadMetadata::default()
        };
        assert!(m.has_api_key());
    }

    #[test]
    fn load_json_metadata() {
        let mut f = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            f,
            r#"{{"api_key":"abc","application_id":"com.example","version_code":"12","build_id":"uuid-1","version_name":"1.2.0"}}"#
        )
        .unwrap();
        let m = UploadMetadata::load_from(f.path()).unwrap();
        assert_eq!(m.api_key, "abc");
        assert_eq!(m.application_id, "com.example");
        assert_eq!(m.version_code, "12");
        assert_eq!(m.build_id, "uuid-1");
        assert_eq!(m.version_name, "1.2.0");
    }

    #[test]
    fn load_toml_metadata_with_missing_fields() {
        let mut f = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(f, "application_id = \"com.example\"").unwrap();
        writeln!(f, "version_name = \"2.0\"").unwrap();
        let m = UploadMetadata::load_from(f.path()).unwrap();
        assert_eq!(m.application_id, "com.example");
        assert_eq!(m.version_name, "2.0");
        assert!(!m.has_api_key());
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(UploadMetadata::load_from(&dir.path().join("nope.toml")).is_err());
    }
}
