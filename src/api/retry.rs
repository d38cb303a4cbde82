//! Bounded retry for the read-only data calls.

use std::future::Future;

use crate::error::ApiError;

/// Wrapping policy applied to every gateway call: re-invoke the whole
/// operation on transient failures, immediately and without backoff, up to a
/// fixed attempt cap. Non-transient failures and the last error after
/// exhaustion propagate unchanged.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    /// Transient means likely to succeed on immediate retry: transport
    /// failures, 429, and all 5xx. Authentication and other 4xx failures are
    /// not transient, and neither are decode failures.
    pub fn is_transient(error: &ApiError) -> bool {
        match error.status {
            Some(status) => status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error(),
            None => error.source.is_some(),
        }
    }

    pub(crate) async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, ApiError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(error) if attempt < self.max_attempts && Self::is_transient(&error) => {
                    tracing::debug!(attempt, %error, "transient failure, retrying");
                    attempt += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }
}
