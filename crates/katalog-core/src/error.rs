//! Error types and handling for katalog-core operations.
//!
//! All public fallible operations return [`Result<T, Error>`]. Errors carry a
//! recoverability hint used by the retry layer: transient transport failures
//! (timeouts, connection resets, 429/5xx responses) are worth retrying, while
//! configuration and decode errors are not.
//!
//! Data-quality problems in individual backend records are *not* errors. A
//! record missing its image or path alias is rejected by normalization as
//! `None` and logged; only transport and decode failures surface here.

use thiserror::Error;

/// The main error type for katalog-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Network operation failed before an HTTP status was received.
    ///
    /// Covers DNS resolution, connection establishment, TLS, and timeouts.
    /// The underlying `reqwest::Error` is preserved for inspection.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}")]
    Http {
        /// Status code returned by the backend.
        status: u16,
        /// URL of the failed request.
        url: String,
    },

    /// Response body could not be decoded as the expected JSON document.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// I/O failure while reading configuration from disk.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns `true` if the error is likely transient and a retry may succeed.
    ///
    /// Recoverable: request timeouts, connection failures, HTTP 429 and 5xx.
    /// Everything else (4xx other than 429, decode errors, bad configuration)
    /// is permanent and retrying would only repeat the failure.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(err) => err.is_timeout() || err.is_connect() || err.is_request(),
            Self::Http { status, .. } => *status == 429 || (500..=599).contains(status),
            Self::Decode(_) | Self::Io(_) | Self::Config(_) => false,
        }
    }

    /// Returns a short category label for logging and diagnostics.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Http { .. } => "http",
            Self::Decode(_) => "decode",
            Self::Io(_) => "io",
            Self::Config(_) => "config",
        }
    }
}

/// Convenience result alias used throughout katalog-core.
pub type Result<T> = std::result::Result<T, Error>;
