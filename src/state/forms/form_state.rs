//! Draft of the prediction form

use super::field::{FieldError, FieldKey};
use crate::prediction::CropType;

pub const DEFAULT_TEMPERATURE: f64 = 25.0;
pub const DEFAULT_RAINFALL: f64 = 500.0;

/// Mutable draft of everything the user can edit on the prediction form.
///
/// Only `crop_type`, `temperature` and `rainfall` end up in the outbound
/// request. The remaining fields are collected for the user's benefit and
/// are never transmitted.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub name: String,
    pub email: String,
    pub crop_type: Option<CropType>,
    pub planting_date: String,
    pub previous_yield: String,
    pub temperature: f64,
    pub rainfall: f64,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            crop_type: None,
            planting_date: String::new(),
            previous_yield: String::new(),
            temperature: DEFAULT_TEMPERATURE,
            rainfall: DEFAULT_RAINFALL,
        }
    }
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one raw widget value into the draft.
    ///
    /// Slider fields are parsed as `f64`; the crop selector accepts an empty
    /// string or one of the option values. Everything else is stored as is.
    /// On error the draft is left untouched.
    pub fn update_field(&mut self, key: FieldKey, raw: &str) -> Result<(), FieldError> {
        match key {
            FieldKey::Name => self.name = raw.to_string(),
            FieldKey::Email => self.email = raw.to_string(),
            FieldKey::PlantingDate => self.planting_date = raw.to_string(),
            FieldKey::PreviousYield => self.previous_yield = raw.to_string(),
            FieldKey::CropType => {
                self.crop_type = if raw.is_empty() {
                    None
                } else {
                    Some(
                        raw.parse::<CropType>()
                            .map_err(|_| FieldError::UnknownCrop(raw.to_string()))?,
                    )
                };
            }
            FieldKey::Temperature => self.temperature = parse_slider(key, raw)?,
            FieldKey::Rainfall => self.rainfall = parse_slider(key, raw)?,
        }
        Ok(())
    }

    /// Current value of a field in the same textual form the widget emits
    pub fn raw_value(&self, key: FieldKey) -> String {
        match key {
            FieldKey::Name => self.name.clone(),
            FieldKey::Email => self.email.clone(),
            FieldKey::CropType => self
                .crop_type
                .map(|c| c.as_str().to_string())
                .unwrap_or_default(),
            FieldKey::PlantingDate => self.planting_date.clone(),
            FieldKey::PreviousYield => self.previous_yield.clone(),
            FieldKey::Temperature => self.temperature.to_string(),
            FieldKey::Rainfall => self.rainfall.to_string(),
        }
    }

    /// Numeric value of a slider field
    pub fn slider_value(&self, key: FieldKey) -> Option<f64> {
        match key {
            FieldKey::Temperature => Some(self.temperature),
            FieldKey::Rainfall => Some(self.rainfall),
            _ => None,
        }
    }
}

fn parse_slider(key: FieldKey, raw: &str) -> Result<f64, FieldError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| FieldError::NotANumber {
            field: key.name(),
            raw: raw.to_string(),
        })
}
