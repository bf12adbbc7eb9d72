use std::time::Duration;

/// Hard ceiling on retries, regardless of what the config asks for.
pub const MAX_RETRY_COUNT: u32 = 5;

/// Caller policy for one upload call.
///
/// The endpoint and timeout are taken as given; validation (if any) happens
/// where the policy is built, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    /// Ingestion endpoint the multipart body is POSTed to.
    pub endpoint: String,
    /// Adds `overwrite=true` to the body so the server replaces an existing upload.
    pub overwrite: bool,
    /// Applied to both connect and read of every attempt.
    pub request_timeout: Duration,
    /// Requested retries after the first attempt; clamped to [`MAX_RETRY_COUNT`].
    pub retry_limit: u32,
    /// Whether a failed upload should abort the caller.
    pub fail_on_error: bool,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            endpoint: "https://upload.bugsnag.com".to_string(),
            overwrite: false,
            request_timeout: Duration::from_millis(60_000),
            retry_limit: 0,
            fail_on_error: true,
        }
    }
}

impl UploadPolicy {
    /// Number of retries actually performed after a failed first attempt.
    pub fn effective_retries(&self) -> u32 {
        self.retry_limit.min(MAX_RETRY_COUNT)
    }

    /// Total attempts including the first one.
    pub fn max_attempts(&self) -> u32 {
        1 + self.effective_retries()
    }
}
