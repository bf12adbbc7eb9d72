//! `mapup upload` – send a mapping file and build metadata to the ingestion endpoint.

use anyhow::{bail, Context, Result};
use mapup_core::checksum;
use mapup_core::config::UploaderConfig;
use mapup_core::metadata::UploadMetadata;
use mapup_core::upload::{self, CurlTransport, MappingFile, UploadPolicy, UploadStatus};
use std::time::Duration;

use crate::cli::UploadArgs;

/// Metadata from `--metadata` (if given) with individual flags applied on top.
pub fn resolve_metadata(args: &UploadArgs) -> Result<UploadMetadata> {
    let mut metadata = match &args.metadata {
        Some(path) => UploadMetadata::load_from(path)?,
        None => UploadMetadata::default(),
    };
    let overrides = [
        (&args.api_key, &mut metadata.api_key),
        (&args.app_id, &mut metadata.application_id),
        (&args.version_code, &mut metadata.version_code),
        (&args.build_uuid, &mut metadata.build_id),
        (&args.version_name, &mut metadata.version_name),
    ];
    for (flag, field) in overrides {
        if let Some(value) = flag {
            *field = value.clone();
        }
    }
    Ok(metadata)
}

/// Policy from config with flag overrides. The endpoint must be an absolute
/// http(s) URL.
pub fn resolve_policy(cfg: &UploaderConfig, args: &UploadArgs) -> Result<UploadPolicy> {
    let mut policy = cfg.to_policy();
    if let Some(endpoint) = &args.endpoint {
        policy.endpoint = endpoint.clone();
    }
    if let Some(overwrite) = args.overwrite_override() {
        policy.overwrite = overwrite;
    }
    if let Some(retries) = args.retries {
        policy.retry_limit = retries;
    }
    if let Some(ms) = args.timeout_ms {
        policy.request_timeout = Duration::from_millis(ms);
    }
    if let Some(fail) = args.fail_on_error_override() {
        policy.fail_on_error = fail;
    }

    let url = url::Url::parse(&policy.endpoint)
        .with_context(|| format!("invalid endpoint {:?}", policy.endpoint))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        bail!("endpoint must be http or https, got {}", url.scheme());
    }
    Ok(policy)
}

pub fn run_upload(cfg: &UploaderConfig, args: &UploadArgs) -> Result<()> {
    let metadata = resolve_metadata(args)?;
    let policy = resolve_policy(cfg, args)?;

    let mapping = match &args.mapping {
        Some(path) => {
            // Diagnostic only: an unreadable file fails each attempt in the
            // transport and the fail policy decides what that means.
            match checksum::fingerprint(path) {
                Ok(fp) => tracing::debug!(
                    "mapping file {} ({} bytes, sha256 {})",
                    path.display(),
                    fp.len,
                    fp.sha256
                ),
                Err(e) => tracing::warn!("mapping file {}: {:#}", path.display(), e),
            }
            let field = args.field.as_deref().unwrap_or(cfg.mapping_field());
            Some(MappingFile::new(path).with_field(field))
        }
        None => None,
    };

    let status = upload::upload(&CurlTransport::new(), &metadata, &policy, mapping);
    match status.enforce(policy.fail_on_error)? {
        UploadStatus::Uploaded { attempts } => {
            println!("Uploaded mapping for build {} ({} attempt(s))", metadata.build_id, attempts);
        }
        UploadStatus::Skipped => {
            tracing::warn!("upload skipped: no API key; continuing because fail-on-error is off");
        }
        UploadStatus::Failed { attempts } => {
            tracing::warn!(
                "upload did not succeed after {} attempt(s); continuing because fail-on-error is off",
                attempts
            );
        }
    }
    Ok(())
}
