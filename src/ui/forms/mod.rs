//! Form rendering module
//!
//! - `field_renderer`: text, selector and slider fields
//! - `prediction_form`: the yield prediction form and its result panel

mod field_renderer;
mod prediction_form;

pub use prediction_form::draw_prediction_form;
