//! Mapping-file upload with bounded, immediate retry.
//!
//! The request body is built once from resolved metadata, then sent through a
//! [`Transport`] until the server answers 200 or the retry ceiling is reached.
//! Failures are logged and reported; whether they abort the caller is decided
//! by [`UploadStatus::enforce`].

mod classify;
mod error;
mod policy;
mod request;
mod run;
mod transport;

pub use classify::{classify, UploadOutcome, SUCCESS_STATUS};
pub use error::{TransportError, UploadError};
pub use policy::{UploadPolicy, MAX_RETRY_COUNT};
pub use request::{build_request_body, MappingFile, RequestBody, DEFAULT_MAPPING_FIELD};
pub use run::{send_with_retry, upload, UploadStatus};
pub use transport::{CurlTransport, Transport, TransportResponse, UploadRequest};
