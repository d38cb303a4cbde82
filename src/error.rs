//! Typed failures surfaced at the crate boundary.
//!
//! The taxonomy is deliberately small: [`AuthenticationError`] for anything
//! that prevents presenting a usable bearer token, [`ApiError`] for a data
//! endpoint that could not be reached or answered non-2xx, and plain
//! [`std::io::Error`] for token-store reads and writes, which are fatal and
//! never retried.

use reqwest::StatusCode;

/// A session could not be established or refreshed.
///
/// Covers missing stored credentials, an expired token with no refresh path,
/// a refresh rejected by the provider (carries the HTTP status), a refresh
/// blocked by missing client configuration, and network failures during the
/// token exchange (carries the transport error as `source`).
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct AuthenticationError {
    pub message: String,
    /// Set when the provider rejected the token exchange.
    pub status: Option<StatusCode>,
    #[source]
    pub source: Option<reqwest::Error>,
}

impl AuthenticationError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            source: None,
        }
    }

    pub(crate) fn with_status(message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            message: message.into(),
            status: Some(status),
            source: None,
        }
    }

    pub(crate) fn transport(message: impl Into<String>, source: reqwest::Error) -> Self {
        let message = format!("{}: {source}", message.into());
        Self {
            message,
            status: None,
            source: Some(source),
        }
    }
}

/// A data-endpoint request failed.
///
/// `status` and `body` are populated for non-2xx responses; transport
/// failures carry the underlying `reqwest` error as `source` and no status.
/// The target URL is always present so callers can render a diagnostic
/// without inspecting internals.
#[derive(Debug, thiserror::Error)]
#[error("{message} ({url})")]
pub struct ApiError {
    pub message: String,
    pub status: Option<StatusCode>,
    /// Raw response body of a non-2xx answer, for diagnostics.
    pub body: Option<String>,
    pub url: String,
    #[source]
    pub source: Option<reqwest::Error>,
}

impl ApiError {
    pub(crate) fn transport(url: &str, source: reqwest::Error) -> Self {
        Self {
            message: format!("network error: {source}"),
            status: None,
            body: None,
            url: url.to_owned(),
            source: Some(source),
        }
    }

    pub(crate) fn http(message: String, status: StatusCode, body: String, url: &str) -> Self {
        Self {
            message,
            status: Some(status),
            body: Some(body),
            url: url.to_owned(),
            source: None,
        }
    }

    pub(crate) fn decode(url: &str, error: impl std::fmt::Display) -> Self {
        Self {
            message: error.to_string(),
            status: None,
            body: None,
            url: url.to_owned(),
            source: None,
        }
    }
}

/// Any failure a public operation can produce.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Authentication(#[from] AuthenticationError),
    #[error(transparent)]
    Api(#[from] ApiError),
    /// Token-store read or write failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
