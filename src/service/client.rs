//! HTTP client for the prediction service
//!
//! Talks JSON to the Flask prediction backend and classifies every way a
//! call can go wrong into a [`PredictionError`].

use super::traits::PredictionService;
use crate::prediction::{PredictionError, PredictionRequest, PredictionResult};
use crate::state::ModelInfo;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Default service address
pub const DEFAULT_ADDRESS: &str = "http://127.0.0.1:5000";

/// Bound on the health and model-info calls, which block the UI loop
pub const STATUS_TIMEOUT: Duration = Duration::from_secs(2);

/// Error body sent by the service on non-success statuses
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// Client for communicating with the prediction service
#[derive(Debug, Clone)]
pub struct ServiceClient {
    http: reqwest::Client,
    base_url: String,
}

impl ServiceClient {
    /// Create a client for `base_url`. `timeout` bounds every request made
    /// through it.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl PredictionService for ServiceClient {
    async fn predict(
        &self,
        request: PredictionRequest,
    ) -> std::result::Result<PredictionResult, PredictionError> {
        let response = self
            .http
            .post(self.endpoint("predict"))
            .json(&request)
            .send()
            .await
            .map_err(classify_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.json::<ErrorBody>().await {
                Err(e) if e.is_timeout() => return Err(PredictionError::Timeout),
                body => body.unwrap_or_default(),
            };
            tracing::debug!(%status, detail = ?body.error, "Prediction service rejected request");
            return Err(PredictionError::server(body.error));
        }

        response
            .json::<PredictionResult>()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PredictionError::Timeout
                } else {
                    PredictionError::ClientError(format!("Invalid prediction response: {e}"))
                }
            })
    }

    async fn health(&self) -> bool {
        let request = self.http.get(self.endpoint("health")).timeout(STATUS_TIMEOUT);
        match request.send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!("Health check failed: {}", e);
                false
            }
        }
    }

    async fn model_info(&self) -> Result<ModelInfo> {
        let response = self
            .http
            .get(self.endpoint("model-info"))
            .timeout(STATUS_TIMEOUT)
            .send()
            .await
            .map_err(|e| anyhow!("Failed to reach prediction service: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<ErrorBody>().await.unwrap_or_default();
            return Err(anyhow!(
                "Failed to get model info ({}): {}",
                status,
                body.error.as_deref().unwrap_or("Unknown error")
            ));
        }

        response
            .json::<ModelInfo>()
            .await
            .map_err(|e| anyhow!("Invalid model info response: {}", e))
    }
}

/// Map a failure that happened before any response arrived
fn classify_send_error(err: reqwest::Error) -> PredictionError {
    if err.is_timeout() {
        PredictionError::Timeout
    } else if err.is_builder() {
        PredictionError::ClientError(err.to_string())
    } else {
        tracing::debug!("Prediction request got no response: {}", err);
        PredictionError::Unreachable
    }
}
