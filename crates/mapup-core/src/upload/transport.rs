//! Transport capability: send one multipart POST, return status and body.
//!
//! The executor only sees [`Transport`]; [`CurlTransport`] is the libcurl
//! implementation used by the CLI. Tests substitute scripted fakes.

use std::fs;
use std::time::Duration;

use super::error::TransportError;
use super::request::RequestBody;

/// Hard cap on one attempt, so a transfer trickling a byte at a time still ends.
const SAFETY_TIMEOUT: Duration = Duration::from_secs(3600);

/// libcurl's low-speed window has one-second resolution; round up so short
/// timeouts are not truncated to zero (which disables the check).
fn stall_window(timeout: Duration) -> Duration {
    let secs = timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0);
    Duration::from_secs(secs.max(1))
}

/// One attempt's worth of request data, borrowed from the caller.
#[derive(Debug, Clone, Copy)]
pub struct UploadRequest<'a> {
    pub endpoint: &'a str,
    pub body: &'a RequestBody,
    /// Connect timeout, and read timeout: the attempt is aborted once the
    /// connection has been stalled this long. Not a limit on total duration.
    pub timeout: Duration,
}

/// HTTP status and body text of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u32,
    pub body: String,
}

/// Minimal send capability the upload executor depends on.
pub trait Transport: Send + Sync {
    fn send(&self, request: &UploadRequest<'_>) -> Result<TransportResponse, TransportError>;
}

/// libcurl-backed transport. Holds no connection state: each `send` creates
/// its own handle, which is dropped (and the connection closed) on return.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurlTransport;

impl CurlTransport {
    pub fn new() -> Self {
        Self
    }

    fn build_form(body: &RequestBody) -> Result<curl::easy::Form, TransportError> {
        let mut form = curl::easy::Form::new();
        if let Some(mapping) = body.mapping() {
            let data = fs::read(&mapping.path).map_err(|source| TransportError::MappingFile {
                path: mapping.path.clone(),
                source,
            })?;
            let file_name = mapping
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| mapping.field.clone());
            form.part(&mapping.field).buffer(&file_name, data).add()?;
        }
        for (name, value) in body.fields() {
            form.part(name).contents(value.as_bytes()).add()?;
        }
        Ok(form)
    }
}

impl Transport for CurlTransport {
    fn send(&self, request: &UploadRequest<'_>) -> Result<TransportResponse, TransportError> {
        let form = Self::build_form(request.body)?;
        let mut response_body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(request.endpoint)?;
        easy.connect_timeout(request.timeout)?;
        // Read timeout as a low-speed limit: abort when less than 1 byte/s moves
        // for the whole window. Large mappings on slow links keep going.
        easy.low_speed_limit(1)?;
        easy.low_speed_time(stall_window(request.timeout))?;
        easy.timeout(SAFETY_TIMEOUT)?;
        easy.httppost(form)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                response_body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        if status == 0 {
            return Err(TransportError::MalformedResponse(
                "no HTTP status in response".to_string(),
            ));
        }
        Ok(TransportResponse {
            status,
            body: String::from_utf8_lossy(&response_body).into_owned(),
        })
    }
}
