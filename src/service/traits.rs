//! Trait abstraction for the prediction service to enable mocking in tests

use crate::prediction::{PredictionError, PredictionRequest, PredictionResult};
use crate::state::ModelInfo;
use anyhow::Result;
use async_trait::async_trait;

/// Operations the TUI needs from the prediction service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PredictionService: Send + Sync {
    /// Request a yield prediction. Transport and status failures are
    /// already classified.
    async fn predict(
        &self,
        request: PredictionRequest,
    ) -> std::result::Result<PredictionResult, PredictionError>;

    /// Check if the service answers its health endpoint
    async fn health(&self) -> bool;

    /// Fetch supported crops, accepted ranges and model weights
    async fn model_info(&self) -> Result<ModelInfo>;
}
