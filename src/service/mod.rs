//! Prediction service module for HTTP communication

mod client;
mod traits;

pub use client::{ServiceClient, DEFAULT_ADDRESS};
pub use traits::PredictionService;

#[cfg(test)]
pub use traits::MockPredictionService;
