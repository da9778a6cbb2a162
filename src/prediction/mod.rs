//! Yield prediction core: request mapping, outcome state machine and the
//! controller that drives a single outbound call per submit.

mod controller;
mod error;
mod outcome;
mod request;

pub use controller::{PredictionController, DEFAULT_REQUEST_TIMEOUT};
pub use error::PredictionError;
pub use outcome::RequestOutcome;
pub use request::{CropType, PredictionRequest, PredictionResult};
