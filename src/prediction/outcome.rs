//! What the result panel should show

use super::{PredictionError, PredictionResult};

/// Display state of the most recent submission
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestOutcome {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// A call is in flight
    Pending,
    Success(PredictionResult),
    Failure(PredictionError),
}

impl RequestOutcome {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        match self {
            Self::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&PredictionError> {
        match self {
            Self::Failure(err) => Some(err),
            _ => None,
        }
    }
}

impl From<Result<PredictionResult, PredictionError>> for RequestOutcome {
    fn from(result: Result<PredictionResult, PredictionError>) -> Self {
        match result {
            Ok(result) => Self::Success(result),
            Err(err) => Self::Failure(err),
        }
    }
}
