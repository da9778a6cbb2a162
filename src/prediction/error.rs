//! Failure taxonomy for a prediction call

use thiserror::Error;

/// Body `error` text used when the service did not send one
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Every way a prediction call can fail. The `Display` text is what the
/// user sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictionError {
    /// No answer within the request timeout
    #[error("Request timed out. Please make sure the prediction service is running and reachable.")]
    Timeout,

    /// The service answered with a non-success status
    #[error("Server Error: {0}")]
    ServerError(String),

    /// The request went out but nothing came back
    #[error("Unable to connect to the prediction service. Make sure it is running and reachable.")]
    Unreachable,

    /// Building, sending or decoding the request failed locally
    #[error("Error: {0}")]
    ClientError(String),
}

impl PredictionError {
    /// Short tag for logs and the status bar
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::ServerError(_) => "server_error",
            Self::Unreachable => "unreachable",
            Self::ClientError(_) => "client_error",
        }
    }

    /// Build a server error from an optional body message
    pub fn server(detail: Option<String>) -> Self {
        Self::ServerError(
            detail
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
        )
    }
}
