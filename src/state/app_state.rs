//! Application state definitions

use super::forms::FieldKey;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Home,
    /// Prediction form; mounts a controller while shown
    Predict,
    /// Service health and model information
    Service,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Predict => "Predict",
            Self::Service => "Service",
        }
    }
}

/// Entries of the home menu, in display order
pub const HOME_MENU: [View; 2] = [View::Predict, View::Service];

/// Number of focusable rows on the prediction form (fields plus submit)
pub const FORM_ROW_COUNT: usize = FieldKey::ALL.len() + 1;

/// Accepted range for one model feature
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRange {
    pub min: f64,
    pub max: f64,
}

/// Response of `GET /model-info`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelInfo {
    #[serde(default)]
    pub supported_crops: Vec<String>,
    #[serde(default)]
    pub feature_ranges: BTreeMap<String, FeatureRange>,
    /// Model coefficients keyed by readable feature name; absent until the
    /// model has been trained
    #[serde(default)]
    pub feature_importance: Option<BTreeMap<String, f64>>,
}

impl ModelInfo {
    /// Feature weights sorted by absolute magnitude, largest first
    pub fn ranked_importance(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<_> = self
            .feature_importance
            .iter()
            .flatten()
            .map(|(name, weight)| (name.as_str(), *weight))
            .collect();
        ranked.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()));
        ranked
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub view_history: Vec<View>,
    pub home_index: usize,

    // Service
    pub service_healthy: bool,
    pub model_info: Option<ModelInfo>,
    pub model_info_error: Option<String>,

    // Form focus
    pub active_form_field: usize,

    // UI state
    pub scroll_offset: usize,
    error_queue: VecDeque<String>,
}

impl AppState {
    /// Move to next form row
    pub fn next_form_field(&mut self) {
        self.active_form_field = (self.active_form_field + 1) % FORM_ROW_COUNT;
    }

    /// Move to previous form row
    pub fn prev_form_field(&mut self) {
        if self.active_form_field == 0 {
            self.active_form_field = FORM_ROW_COUNT - 1;
        } else {
            self.active_form_field -= 1;
        }
    }

    /// Field under focus, `None` when the submit button is focused
    pub fn focused_field(&self) -> Option<FieldKey> {
        FieldKey::ALL.get(self.active_form_field).copied()
    }

    pub fn is_submit_focused(&self) -> bool {
        self.active_form_field == FORM_ROW_COUNT - 1
    }

    pub fn next_home_item(&mut self) {
        self.home_index = (self.home_index + 1) % HOME_MENU.len();
    }

    pub fn prev_home_item(&mut self) {
        if self.home_index == 0 {
            self.home_index = HOME_MENU.len() - 1;
        } else {
            self.home_index -= 1;
        }
    }

    pub fn selected_home_item(&self) -> View {
        HOME_MENU[self.home_index.min(HOME_MENU.len() - 1)]
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// Queue an error for the error dialog
    pub fn push_error(&mut self, message: String) {
        tracing::warn!("{}", message);
        self.error_queue.push_back(message);
    }

    /// Error currently shown in the dialog
    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_focus_wraps_through_submit() {
        let mut state = AppState::default();
        assert_eq!(state.focused_field(), Some(FieldKey::Name));

        for _ in 0..FieldKey::ALL.len() {
            state.next_form_field();
        }
        assert!(state.is_submit_focused());
        assert_eq!(state.focused_field(), None);

        state.next_form_field();
        assert_eq!(state.active_form_field, 0);

        state.prev_form_field();
        assert!(state.is_submit_focused());
    }

    #[test]
    fn test_home_menu_cycles() {
        let mut state = AppState::default();
        assert_eq!(state.selected_home_item(), View::Predict);
        state.next_home_item();
        assert_eq!(state.selected_home_item(), View::Service);
        state.next_home_item();
        assert_eq!(state.selected_home_item(), View::Predict);
        state.prev_home_item();
        assert_eq!(state.selected_home_item(), View::Service);
    }

    #[test]
    fn test_error_queue_is_fifo() {
        let mut state = AppState::default();
        assert!(state.current_error().is_none());
        state.push_error("first".to_string());
        state.push_error("second".to_string());
        assert_eq!(state.current_error(), Some("first"));
        state.dismiss_error();
        assert_eq!(state.current_error(), Some("second"));
        state.dismiss_error();
        assert!(state.current_error().is_none());
    }

    #[test]
    fn test_scroll_does_not_underflow() {
        let mut state = AppState::default();
        state.scroll_up();
        assert_eq!(state.scroll_offset, 0);
        state.scroll_down();
        assert_eq!(state.scroll_offset, 1);
    }

    #[test]
    fn test_model_info_deserializes_service_payload() {
        let json = r#"{
            "supported_crops": ["wheat", "rice", "corn"],
            "feature_ranges": {
                "rainfall": {"min": 0, "max": 3000},
                "soil_ph": {"min": 3.0, "max": 10.0}
            },
            "feature_importance": {"Rainfall": 0.01, "Crop Type": -2.5, "Area": 1.2}
        }"#;
        let info: ModelInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.supported_crops.len(), 3);
        assert_eq!(info.feature_ranges["soil_ph"].max, 10.0);

        let ranked = info.ranked_importance();
        assert_eq!(ranked[0].0, "Crop Type");
        assert_eq!(ranked[1].0, "Area");
        assert_eq!(ranked[2].0, "Rainfall");
    }

    #[test]
    fn test_model_info_without_importance() {
        let info: ModelInfo = serde_json::from_str(r#"{"feature_importance": null}"#).unwrap();
        assert!(info.ranked_importance().is_empty());
        assert!(info.supported_crops.is_empty());
    }
}
