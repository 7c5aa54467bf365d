//! Error types for the SIDRA client.

use thiserror::Error;

/// Errors that can occur while fetching a SIDRA table.
///
/// All of them are fatal for the run; the client does not retry.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SidraError {
    /// The request could not be sent or the body could not be read.
    #[error("network error fetching {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-success status.
    #[error("SIDRA API returned HTTP {status} for {url}: {message}")]
    Status {
        url: String,
        status: u16,
        message: String,
    },

    /// The response body is not the expected row array.
    #[error("unexpected SIDRA payload: {0}")]
    Payload(String),
}

impl SidraError {
    /// Returns a short message suitable for the command-line summary.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Network { .. } => {
                "Could not connect to the IBGE SIDRA API. Please check your internet connection."
            }
            Self::Status { .. } => "The SIDRA API rejected the query.",
            Self::Payload(_) => "The SIDRA API returned data in an unexpected format.",
        }
    }
}

/// Result type for SIDRA operations.
pub type Result<T> = std::result::Result<T, SidraError>;
