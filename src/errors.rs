use reqwest::StatusCode;
use std::error::Error as StdError;
use thiserror::Error;
use url::Url;

/// Result type alias for Alertmanager operations
pub type Result<T> = std::result::Result<T, AlertmanagerError>;

/// Errors that can occur when reading from Alertmanager
#[derive(Debug, Error)]
pub enum AlertmanagerError {
    /// Invalid base URL, path or option combination
    #[error("Invalid client configuration: {0}")]
    Configuration(String),

    /// Failed to build HTTP client
    #[error("Failed to build HTTP client: {0}")]
    BuildHttpClient(#[source] reqwest::Error),

    /// HTTP request failed (connection, DNS, TLS, timeout)
    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest_middleware::Error),

    /// Alertmanager answered with a status other than 200
    #[error("Unexpected response for {url}: HTTP {status}")]
    UnexpectedStatus {
        /// Requested URL
        url: Url,
        /// HTTP status returned
        status: StatusCode,
        /// Response body, if it could be read
        message: String,
    },

    /// Response declared gzip encoding but the body is not a valid gzip stream
    #[error("Failed to decompress response body: {0}")]
    Decompression(#[source] std::io::Error),

    /// Top-level JSON value is not an array
    #[error("Malformed response: expected JSON array: {0}")]
    NotAnArray(#[source] serde_json::Error),

    /// An array element could not be decoded
    #[error("Malformed response: cannot decode element {index}: {source}")]
    MalformedElement {
        /// Zero-based position of the element in the array
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Unexpected data after the closing bracket of the array
    #[error("Malformed response: trailing data after JSON array: {0}")]
    TrailingData(#[source] serde_json::Error),
}

impl AlertmanagerError {
    /// Check if the response body did not hold the expected JSON array
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::NotAnArray(_) | Self::MalformedElement { .. } | Self::TrailingData(_)
        )
    }

    /// Check if the error is retryable
    ///
    /// The client never retries on its own; this is a hint for callers.
    ///
    /// Returns `true` for:
    /// - Network/connection errors
    /// - Timeout errors
    /// - Server errors (5xx status codes)
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request(reqwest_middleware::Error::Reqwest(err)) => {
                err.is_connect() || err.is_timeout()
            }
            Self::Request(source) => {
                if let Some(reqwest_err) = StdError::source(source) {
                    if let Some(err) = reqwest_err.downcast_ref::<reqwest::Error>() {
                        return err.is_connect() || err.is_timeout();
                    }
                }
                false
            }
            Self::UnexpectedStatus { status, .. } => status.is_server_error(),
            _ => false,
        }
    }
}
