//! Transport errors.

use thiserror::Error;

/// Errors from [`crate::HttpRaceService`].
#[derive(Debug, Error)]
pub enum TransportError {
    /// Base URL is not an absolute http(s) URL.
    #[error("invalid base url {url:?}: {reason}")]
    InvalidUrl {
        /// Configured value.
        url: String,
        /// Parse failure.
        reason: String,
    },

    /// Connection, I/O or body decoding failure.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Service answered with a non-2xx status.
    #[error("HTTP {status} from {url}")]
    Status {
        /// Response status code.
        status: u16,
        /// Requested URL.
        url: String,
    },
}
