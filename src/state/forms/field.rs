//! Form field identifiers and slider metadata

use crate::prediction::CropType;
use thiserror::Error;

/// Closed set of editable fields on the prediction form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    Name,
    Email,
    CropType,
    PlantingDate,
    PreviousYield,
    Temperature,
    Rainfall,
}

impl FieldKey {
    /// All fields in display order
    pub const ALL: [FieldKey; 7] = [
        FieldKey::Name,
        FieldKey::Email,
        FieldKey::CropType,
        FieldKey::PlantingDate,
        FieldKey::PreviousYield,
        FieldKey::Temperature,
        FieldKey::Rainfall,
    ];

    /// Stable field identifier
    pub fn name(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::CropType => "crop_type",
            Self::PlantingDate => "planting_date",
            Self::PreviousYield => "previous_yield",
            Self::Temperature => "temperature",
            Self::Rainfall => "rainfall",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::CropType => "Crop Type",
            Self::PlantingDate => "Planting Date (YYYY-MM-DD)",
            Self::PreviousYield => "Previous Yield (tons/acre, optional)",
            Self::Temperature => "Temperature (°C)",
            Self::Rainfall => "Rainfall (mm)",
        }
    }

    /// Slider range for numeric fields, `None` for text fields
    pub fn slider(&self) -> Option<SliderSpec> {
        match self {
            Self::Temperature => Some(SliderSpec {
                min: 0.0,
                max: 50.0,
                step: 1.0,
            }),
            Self::Rainfall => Some(SliderSpec {
                min: 0.0,
                max: 2000.0,
                step: 10.0,
            }),
            _ => None,
        }
    }

    pub fn is_slider(&self) -> bool {
        self.slider().is_some()
    }
}

/// Range and step of a slider-backed field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderSpec {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl SliderSpec {
    /// Move `value` by `steps` increments, clamped to the range
    pub fn nudge(&self, value: f64, steps: i32) -> f64 {
        (value + self.step * f64::from(steps)).clamp(self.min, self.max)
    }
}

/// A raw value the form widget should never have emitted
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("{field} expects a number, got {raw:?}")]
    NotANumber { field: &'static str, raw: String },

    #[error("unknown crop type {0:?}")]
    UnknownCrop(String),
}

/// Cycle through the crop options, with "no selection" between the ends
pub fn cycle_crop(current: Option<CropType>, forward: bool) -> Option<CropType> {
    let all = CropType::ALL;
    let last = all.len() - 1;
    match (current, forward) {
        (None, true) => Some(all[0]),
        (None, false) => Some(all[last]),
        (Some(crop), true) => {
            let idx = crop.index();
            if idx == last {
                None
            } else {
                Some(all[idx + 1])
            }
        }
        (Some(crop), false) => {
            let idx = crop.index();
            if idx == 0 {
                None
            } else {
                Some(all[idx - 1])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_temperature_and_rainfall_are_sliders() {
        let sliders: Vec<_> = FieldKey::ALL.into_iter().filter(|k| k.is_slider()).collect();
        assert_eq!(sliders, vec![FieldKey::Temperature, FieldKey::Rainfall]);
    }

    #[test]
    fn test_nudge_clamps_to_range() {
        let temp = FieldKey::Temperature.slider().unwrap();
        assert_eq!(temp.nudge(25.0, 1), 26.0);
        assert_eq!(temp.nudge(50.0, 1), 50.0);
        assert_eq!(temp.nudge(0.0, -1), 0.0);

        let rain = FieldKey::Rainfall.slider().unwrap();
        assert_eq!(rain.nudge(500.0, 1), 510.0);
        assert_eq!(rain.nudge(1995.0, 1), 2000.0);
    }

    #[test]
    fn test_cycle_crop_wraps_through_empty() {
        assert_eq!(cycle_crop(None, true), Some(CropType::Wheat));
        assert_eq!(cycle_crop(Some(CropType::Tomato), true), None);
        assert_eq!(cycle_crop(None, false), Some(CropType::Tomato));
        assert_eq!(cycle_crop(Some(CropType::Wheat), false), None);
        assert_eq!(cycle_crop(Some(CropType::Rice), true), Some(CropType::Corn));
    }
}
