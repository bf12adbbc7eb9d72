//! Classify the result of one transport call into an upload outcome.

use super::error::TransportError;
use super::transport::TransportResponse;

/// The only status the ingestion endpoint uses to acknowledge an upload.
pub const SUCCESS_STATUS: u32 = 200;

/// Result of a single attempt. Anything but `Success` is retried.
#[derive(Debug)]
pub enum UploadOutcome {
    Success,
    TransportFailure(TransportError),
    ServerRejected { status: u32, body: String },
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, UploadOutcome::Success)
    }
}

/// Exactly 200 is success; any other status (including other 2xx) is a rejection.
pub fn classify(result: Result<TransportResponse, TransportError>) -> UploadOutcome {
    match result {
        Ok(resp) if resp.status == SUCCESS_STATUS => UploadOutcome::Success,
        Ok(resp) => UploadOutcome::ServerRejected {
            status: resp.status,
            body: resp.body,
        },
        Err(e) => UploadOutcome::TransportFailure(e),
    }
}
