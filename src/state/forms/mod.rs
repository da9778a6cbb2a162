//! Form domain layer
//!
//! Type-safe draft state for the prediction form. Fields are addressed
//! through the closed [`FieldKey`] enum.

mod field;
mod form_state;

pub use field::{cycle_crop, FieldError, FieldKey, SliderSpec};
pub use form_state::FormState;
