//! Prediction request controller
//!
//! Owns the form draft and the outcome of the latest submission. A submit
//! spawns the outbound call on its own task; the result comes back over a
//! channel tagged with the generation it was issued under and is applied by
//! [`PredictionController::poll_completions`] from the UI loop.
//!
//! Dropping the controller drops the receiving end, so a call that settles
//! afterwards has nowhere to deliver its result and is discarded.

use super::{PredictionError, PredictionRequest, PredictionResult, RequestOutcome};
use crate::service::PredictionService;
use crate::state::{FieldError, FieldKey, FormState};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Hard client-side bound on a single prediction call
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Settled call, tagged with the generation that issued it
#[derive(Debug)]
struct Completion {
    generation: u64,
    result: Result<PredictionResult, PredictionError>,
}

pub struct PredictionController {
    service: Arc<dyn PredictionService>,
    timeout: Duration,
    form: FormState,
    outcome: RequestOutcome,
    generation: u64,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
}

impl PredictionController {
    pub fn new(service: Arc<dyn PredictionService>, timeout: Duration) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            service,
            timeout,
            form: FormState::new(),
            outcome: RequestOutcome::Idle,
            generation: 0,
            completions_tx,
            completions_rx,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn outcome(&self) -> &RequestOutcome {
        &self.outcome
    }

    pub fn is_pending(&self) -> bool {
        self.outcome.is_pending()
    }

    /// Merge one raw widget value into the draft
    pub fn update_field(&mut self, key: FieldKey, raw: &str) -> Result<(), FieldError> {
        self.form.update_field(key, raw)
    }

    /// Dispatch a prediction for the current draft.
    ///
    /// Returns `false` without doing anything while a previous call is
    /// still pending. Must be called from within a tokio runtime.
    pub fn submit(&mut self) -> bool {
        if self.outcome.is_pending() {
            tracing::debug!(generation = self.generation, "Submit ignored while pending");
            return false;
        }

        self.generation += 1;
        self.outcome = RequestOutcome::Pending;

        let request = PredictionRequest::from_form(&self.form);
        let generation = self.generation;
        let service = Arc::clone(&self.service);
        let tx = self.completions_tx.clone();
        let timeout = self.timeout;

        tracing::info!(
            generation,
            crop_type = ?request.crop_type,
            temperature = request.temperature,
            rainfall = request.rainfall,
            "Submitting prediction request"
        );

        tokio::spawn(async move {
            let result = match tokio::time::timeout(timeout, service.predict(request)).await {
                Ok(result) => result,
                Err(_) => Err(PredictionError::Timeout),
            };
            if tx.send(Completion { generation, result }).is_err() {
                tracing::debug!(generation, "Controller gone, discarding prediction result");
            }
        });

        true
    }

    /// Apply every completion that has arrived so far without waiting.
    /// Returns true if the outcome changed.
    pub fn poll_completions(&mut self) -> bool {
        let mut changed = false;
        while let Ok(completion) = self.completions_rx.try_recv() {
            changed |= self.apply(completion);
        }
        changed
    }

    /// Wait until the in-flight call (if any) has settled and been applied
    #[cfg(test)]
    pub async fn settle(&mut self) {
        while self.outcome.is_pending() {
            match self.completions_rx.recv().await {
                Some(completion) => {
                    self.apply(completion);
                }
                None => break,
            }
        }
    }

    fn apply(&mut self, completion: Completion) -> bool {
        if completion.generation != self.generation || !self.outcome.is_pending() {
            tracing::debug!(
                generation = completion.generation,
                current = self.generation,
                "Discarding stale prediction result"
            );
            return false;
        }

        match &completion.result {
            Ok(result) => tracing::info!(
                generation = completion.generation,
                total_yield = result.total_yield,
                yield_per_hectare = result.yield_per_hectare,
                "Prediction succeeded"
            ),
            Err(err) => tracing::warn!(
                generation = completion.generation,
                kind = err.kind(),
                "Prediction failed: {}",
                err
            ),
        }

        self.outcome = completion.result.into();
        true
    }
}
