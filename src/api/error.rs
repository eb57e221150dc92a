//! Service-call error types
//!
//! All errors that can occur while talking to the catalog service. The
//! service reports machine-readable failures as a JSON body with a
//! `detail` field; when one is present it is carried verbatim so the UI
//! can surface it.

use thiserror::Error;

/// Errors from the remote catalog service
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connection refused, timeout, TLS, ...)
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("Service error ({status}): {detail}")]
    Status {
        /// HTTP status code
        status: u16,
        /// The service's `detail` message, or the canonical status reason
        detail: String,
    },

    /// The response body could not be decoded into the expected shape
    #[error("Error while decoding response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Message suitable for a user-facing error banner
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(e) => format!("could not reach the catalog service: {e}"),
            Self::Status { detail, .. } => detail.clone(),
            Self::Decode(msg) => format!("unexpected response from service: {msg}"),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
