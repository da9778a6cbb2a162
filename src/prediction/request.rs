//! Wire types exchanged with the prediction service

use crate::state::FormState;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Fixed humidity (%) sent with every request
pub const DEFAULT_HUMIDITY: f64 = 60.0;
/// Fixed soil pH sent with every request
pub const DEFAULT_SOIL_PH: f64 = 6.5;
/// Fixed fertilizer use (kg/ha) sent with every request
pub const DEFAULT_FERTILIZER: f64 = 100.0;
/// Fixed cultivated area (ha) sent with every request
pub const DEFAULT_AREA: f64 = 10.0;

/// Crops the prediction service knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropType {
    Wheat,
    Rice,
    Corn,
    Barley,
    Soybean,
    Potato,
    Tomato,
}

impl CropType {
    pub const ALL: [CropType; 7] = [
        CropType::Wheat,
        CropType::Rice,
        CropType::Corn,
        CropType::Barley,
        CropType::Soybean,
        CropType::Potato,
        CropType::Tomato,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wheat => "wheat",
            Self::Rice => "rice",
            Self::Corn => "corn",
            Self::Barley => "barley",
            Self::Soybean => "soybean",
            Self::Potato => "potato",
            Self::Tomato => "tomato",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Wheat => "Wheat",
            Self::Rice => "Rice",
            Self::Corn => "Corn",
            Self::Barley => "Barley",
            Self::Soybean => "Soybean",
            Self::Potato => "Potato",
            Self::Tomato => "Tomato",
        }
    }

    /// Position in [`CropType::ALL`]
    pub fn index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|c| c == self)
            .unwrap_or_default()
    }
}

impl fmt::Display for CropType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CropType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown crop type: {s}"))
    }
}

/// Payload of `POST /predict`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub crop_type: Option<CropType>,
    pub temperature: f64,
    pub rainfall: f64,
    pub humidity: f64,
    pub soil_ph: f64,
    pub fertilizer: f64,
    pub area: f64,
}

impl PredictionRequest {
    /// Build the request from the draft; the fixed agronomic values are
    /// always filled in regardless of what the draft holds.
    pub fn from_form(form: &FormState) -> Self {
        Self {
            crop_type: form.crop_type,
            temperature: form.temperature,
            rainfall: form.rainfall,
            humidity: DEFAULT_HUMIDITY,
            soil_ph: DEFAULT_SOIL_PH,
            fertilizer: DEFAULT_FERTILIZER,
            area: DEFAULT_AREA,
        }
    }
}

/// Successful response of `POST /predict`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Predicted total yield in tons
    pub total_yield: f64,
    /// Predicted yield in tons per hectare
    pub yield_per_hectare: f64,
    /// Anything else the service sent back
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PredictionResult {
    /// One-line summary used for the clipboard
    pub fn summary(&self) -> String {
        format!(
            "Total yield: {} tons, yield per hectare: {} tons/ha",
            self.total_yield, self.yield_per_hectare
        )
    }
}
