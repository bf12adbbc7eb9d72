//! Upload executor: precondition check, attempt, classify, immediate retry.

use crate::metadata::UploadMetadata;

use super::classify::{classify, UploadOutcome};
use super::error::UploadError;
use super::policy::UploadPolicy;
use super::request::{build_request_body, MappingFile, RequestBody};
use super::transport::{Transport, UploadRequest};

/// Final result of one upload call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    /// Server answered 200 on attempt number `attempts`.
    Uploaded { attempts: u32 },
    /// Precondition failed; no request was sent.
    Skipped,
    /// All `attempts` failed.
    Failed { attempts: u32 },
}

impl UploadStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, UploadStatus::Uploaded { .. })
    }

    /// Number of requests issued (0 when skipped).
    pub fn attempts(&self) -> u32 {
        match self {
            UploadStatus::Uploaded { attempts } | UploadStatus::Failed { attempts } => *attempts,
            UploadStatus::Skipped => 0,
        }
    }

    /// Apply the caller's fail policy: with `fail_on_error` a skipped or
    /// failed upload becomes an error, otherwise it is passed through.
    pub fn enforce(self, fail_on_error: bool) -> Result<UploadStatus, UploadError> {
        match self {
            UploadStatus::Skipped if fail_on_error => Err(UploadError::InvalidParameters),
            UploadStatus::Failed { .. } if fail_on_error => Err(UploadError::UploadFailed),
            other => Ok(other),
        }
    }
}

/// Validate metadata, build the body once, and send it with retries.
///
/// Never returns an error: the caller decides via [`UploadStatus::enforce`]
/// whether a failure is fatal.
pub fn upload<T: Transport + ?Sized>(
    transport: &T,
    metadata: &UploadMetadata,
    policy: &UploadPolicy,
    mapping: Option<MappingFile>,
) -> UploadStatus {
    let span = tracing::info_span!(
        "upload",
        app_id = %metadata.application_id,
        version_name = %metadata.version_name
    );
    let _enter = span.enter();

    if !metadata.has_api_key() {
        tracing::warn!("Skipping upload due to invalid parameters");
        return UploadStatus::Skipped;
    }

    let body = build_request_body(metadata, policy, mapping);
    send_with_retry(transport, &body, policy)
}

/// Send `body` until the server answers 200 or `1 + min(retry_limit, 5)`
/// attempts have failed. The same body is reused for every attempt and
/// retries are issued immediately.
pub fn send_with_retry<T: Transport + ?Sized>(
    transport: &T,
    body: &RequestBody,
    policy: &UploadPolicy,
) -> UploadStatus {
    let retries = policy.effective_retries();
    let mut attempt = 1u32;
    loop {
        if attempt > 1 {
            tracing::warn!("Retrying upload ({}/{}) ...", attempt - 1, retries);
        }
        if attempt_once(transport, body, policy) {
            return UploadStatus::Uploaded { attempts: attempt };
        }
        if attempt > retries {
            return UploadStatus::Failed { attempts: attempt };
        }
        attempt += 1;
    }
}

/// One POST; logs the outcome and reports whether it succeeded.
fn attempt_once<T: Transport + ?Sized>(
    transport: &T,
    body: &RequestBody,
    policy: &UploadPolicy,
) -> bool {
    tracing::info!("Attempting upload of mapping file to {}", policy.endpoint);
    let request = UploadRequest {
        endpoint: &policy.endpoint,
        body,
        timeout: policy.request_timeout,
    };
    match classify(transport.send(&request)) {
        UploadOutcome::Success => {
            tracing::info!("Upload successful");
            true
        }
        UploadOutcome::TransportFailure(e) => {
            tracing::error!("Upload failed: {}", e);
            false
        }
        UploadOutcome::ServerRejected { status, body } => {
            tracing::error!("Upload failed with code {}: {}", status, body);
            false
        }
    }
}
