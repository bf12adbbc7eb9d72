//! Multipart request body assembled once per upload call.

use crate::metadata::UploadMetadata;
use std::path::PathBuf;

use super::policy::UploadPolicy;

/// Form field used for the mapping file when none is configured.
pub const DEFAULT_MAPPING_FIELD: &str = "proguard";

/// File part attached ahead of the metadata fields. Only the path is held;
/// the transport reads the file when the request is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingFile {
    pub field: String,
    pub path: PathBuf,
}

impl MappingFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            field: DEFAULT_MAPPING_FIELD.to_string(),
            path: path.into(),
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }
}

/// Ordered multipart fields plus the optional mapping file.
///
/// Field order is insertion order and is preserved on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBody {
    mapping: Option<MappingFile>,
    fields: Vec<(String, String)>,
}

impl RequestBody {
    fn push(&mut self, name: &str, value: impl Into<String>) {
        self.fields.push((name.to_string(), value.into()));
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn mapping(&self) -> Option<&MappingFile> {
        self.mapping.as_ref()
    }
}

/// Build the request body from already validated metadata.
///
/// Never fails and touches neither disk nor network.
pub fn build_request_body(
    metadata: &UploadMetadata,
    policy: &UploadPolicy,
    mapping: Option<MappingFile>,
) -> RequestBody {
    let mut body = RequestBody {
        mapping,
        fields: Vec::with_capacity(6),
    };
    body.push("apiKey", metadata.api_key.as_str());
    body.push("appId", metadata.application_id.as_str());
    body.push("versionCode", metadata.version_code.as_str());
    body.push("buildUUID", metadata.build_id.as_str());
    body.push("versionName", metadata.version_name.as_str());
    if policy.overwrite {
        body.push("overwrite", "true");
    }

    for (name, value) in body.fields() {
        tracing::debug!("{}: {}", name, value);
    }
    if let Some(m) = body.mapping() {
        tracing::debug!("{}: {}", m.field, m.path.display());
    }
    body
}
