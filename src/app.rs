//! Application state and core logic

use crate::config::TuiConfig;
use crate::prediction::PredictionController;
use crate::service::{PredictionService, ServiceClient};
use crate::state::{cycle_crop, AppState, FieldKey, FormState, View};
use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent};
use std::sync::Arc;
use std::time::Duration;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Prediction service shared with in-flight calls
    service: Arc<dyn PredictionService>,
    /// Service address, for display
    pub service_url: String,
    /// Client-side bound handed to each mounted controller
    request_timeout: Duration,
    /// Mounted while the Predict view is shown
    pub controller: Option<PredictionController>,
    /// Whether the app should quit
    quit: bool,
    /// Feedback shown in the status bar
    pub status_message: Option<String>,
}

impl App {
    /// Create a new App instance talking to the configured service
    pub async fn new(config: &TuiConfig) -> Result<Self> {
        let service_url = config.api_url();
        let timeout = config.request_timeout();
        let client = ServiceClient::new(service_url.clone(), timeout)?;
        tracing::info!("Using prediction service at {}", client.base_url());

        let mut app = Self::with_service(Arc::new(client), service_url, timeout);
        app.refresh_health().await;
        Ok(app)
    }

    /// Create an App around an existing service
    pub fn with_service(
        service: Arc<dyn PredictionService>,
        service_url: String,
        request_timeout: Duration,
    ) -> Self {
        Self {
            state: AppState::default(),
            service,
            service_url,
            request_timeout,
            controller: None,
            quit: false,
            status_message: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Apply any prediction results that arrived since the last tick
    pub fn tick(&mut self) {
        let Some(controller) = self.controller.as_mut() else {
            return;
        };
        if controller.poll_completions() {
            let outcome = controller.outcome();
            self.status_message = if let Some(err) = outcome.error() {
                Some(format!("Prediction failed ({})", err.kind()))
            } else if outcome.result().is_some() {
                Some("Prediction ready".to_string())
            } else {
                None
            };
        }
    }

    /// Re-check the service health endpoint
    pub async fn refresh_health(&mut self) {
        self.state.service_healthy = self.service.health().await;
    }

    /// Reload health and model information for the Service view
    pub async fn refresh_service_info(&mut self) {
        self.refresh_health().await;
        match self.service.model_info().await {
            Ok(info) => {
                self.state.model_info = Some(info);
                self.state.model_info_error = None;
            }
            Err(e) => {
                tracing::warn!("Failed to load model info: {}", e);
                self.state.model_info = None;
                self.state.model_info_error = Some(e.to_string());
            }
        }
    }

    /// Switch views, mounting or unmounting the prediction controller
    pub fn navigate(&mut self, view: View) {
        if view == self.state.current_view {
            return;
        }
        self.state.view_history.push(self.state.current_view);
        self.enter(view);
    }

    /// Return to the previous view
    pub fn go_back(&mut self) {
        let previous = self.state.view_history.pop().unwrap_or_default();
        self.enter(previous);
    }

    fn enter(&mut self, view: View) {
        if self.state.current_view == View::Predict && view != View::Predict {
            // Unmount: any call still in flight is orphaned
            self.controller = None;
        }
        if view == View::Predict && self.controller.is_none() {
            self.controller = Some(PredictionController::new(
                Arc::clone(&self.service),
                self.request_timeout,
            ));
            self.state.active_form_field = 0;
        }
        self.state.current_view = view;
        self.state.scroll_offset = 0;
        self.status_message = None;
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.state.current_error().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        match self.state.current_view {
            View::Home => self.handle_home_key(key).await,
            View::Predict => self.handle_predict_key(key),
            View::Service => self.handle_service_key(key).await,
        }
    }

    async fn handle_home_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => self.state.next_home_item(),
            KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => self.state.prev_home_item(),
            KeyCode::Enter => {
                let target = self.state.selected_home_item();
                self.open(target).await;
            }
            KeyCode::Char('p') => self.open(View::Predict).await,
            KeyCode::Char('s') => self.open(View::Service).await,
            _ => {}
        }
        Ok(())
    }

    async fn open(&mut self, view: View) {
        self.navigate(view);
        if view == View::Service {
            self.refresh_service_info().await;
        }
    }

    async fn handle_service_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.go_back(),
            KeyCode::Char('r') => {
                self.refresh_service_info().await;
                self.status_message = Some("Service info refreshed".to_string());
            }
            KeyCode::Down | KeyCode::Char('j') => self.state.scroll_down(),
            KeyCode::Up | KeyCode::Char('k') => self.state.scroll_up(),
            _ => {}
        }
        Ok(())
    }

    fn handle_predict_key(&mut self, key: KeyEvent) -> Result<()> {
        let focused = self.state.focused_field();
        let ctrl = crate::platform::is_shortcut(key.modifiers);

        match key.code {
            KeyCode::Char('s') if ctrl => self.submit_prediction(),
            KeyCode::Char('y') if ctrl => self.copy_result(),
            KeyCode::Esc => self.go_back(),
            KeyCode::Tab | KeyCode::Down => self.state.next_form_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.prev_form_field(),
            KeyCode::Enter if self.state.is_submit_focused() => self.submit_prediction(),
            KeyCode::Enter => self.state.next_form_field(),
            KeyCode::Left | KeyCode::Right => {
                if let Some(field) = focused {
                    self.adjust_field(field, key.code == KeyCode::Right);
                }
            }
            KeyCode::Char(c) if !ctrl => {
                if let Some(field) = focused {
                    self.type_into_field(field, c);
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = focused {
                    self.backspace_field(field);
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Left/Right on the crop selector or a slider
    fn adjust_field(&mut self, field: FieldKey, forward: bool) {
        let Some(controller) = self.controller.as_ref() else {
            return;
        };
        let form = controller.form();
        let raw = if let Some(slider) = field.slider() {
            let current = form.slider_value(field).unwrap_or(slider.min);
            slider
                .nudge(current, if forward { 1 } else { -1 })
                .to_string()
        } else if field == FieldKey::CropType {
            cycle_crop(form.crop_type, forward)
                .map(|c| c.as_str().to_string())
                .unwrap_or_default()
        } else {
            return;
        };
        self.emit(field, &raw);
    }

    fn type_into_field(&mut self, field: FieldKey, c: char) {
        let accepted = match field {
            FieldKey::Name | FieldKey::Email => !c.is_control(),
            FieldKey::PlantingDate => c.is_ascii_digit() || c == '-',
            FieldKey::PreviousYield => c.is_ascii_digit() || c == '.',
            // Selector and sliders take Left/Right only
            FieldKey::CropType | FieldKey::Temperature | FieldKey::Rainfall => false,
        };
        if !accepted {
            return;
        }
        let Some(controller) = self.controller.as_ref() else {
            return;
        };
        let mut raw = controller.form().raw_value(field);
        raw.push(c);
        self.emit(field, &raw);
    }

    fn backspace_field(&mut self, field: FieldKey) {
        if field.is_slider() || field == FieldKey::CropType {
            return;
        }
        let Some(controller) = self.controller.as_ref() else {
            return;
        };
        let mut raw = controller.form().raw_value(field);
        raw.pop();
        self.emit(field, &raw);
    }

    /// Hand a widget value to the controller
    fn emit(&mut self, field: FieldKey, raw: &str) {
        if let Some(controller) = self.controller.as_mut() {
            if let Err(e) = controller.update_field(field, raw) {
                tracing::warn!("Rejected form input: {}", e);
            }
        }
    }

    /// Check required inputs, then hand off to the controller
    fn submit_prediction(&mut self) {
        let Some(controller) = self.controller.as_mut() else {
            return;
        };
        if controller.is_pending() {
            return;
        }
        if let Err(message) = validate_required(controller.form()) {
            self.push_error(message);
            return;
        }
        if controller.submit() {
            self.status_message = Some("Calculating...".to_string());
        }
    }

    fn copy_result(&mut self) {
        let summary = self
            .controller
            .as_ref()
            .and_then(|c| c.outcome().result())
            .map(|r| r.summary());
        let Some(summary) = summary else {
            return;
        };
        match copy_to_clipboard(&summary) {
            Ok(()) => self.status_message = Some("Copied prediction to clipboard".to_string()),
            Err(e) => self.push_error(format!("Failed to copy: {e}")),
        }
    }
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text.to_string())?;
    Ok(())
}

/// Required-field checks the form performs before it lets a submit through
pub fn validate_required(form: &FormState) -> std::result::Result<(), String> {
    let mut missing = Vec::new();
    if form.name.trim().is_empty() {
        missing.push(FieldKey::Name.label());
    }
    if form.email.trim().is_empty() {
        missing.push(FieldKey::Email.label());
    }
    if form.crop_type.is_none() {
        missing.push(FieldKey::CropType.label());
    }
    if form.planting_date.trim().is_empty() {
        missing.push("Planting Date");
    }
    if !missing.is_empty() {
        return Err(format!("Please fill in: {}", missing.join(", ")));
    }

    let mut problems = Vec::new();
    if !is_plausible_email(&form.email) {
        problems.push("Please enter a valid email address.".to_string());
    }
    if NaiveDate::parse_from_str(form.planting_date.trim(), "%Y-%m-%d").is_err() {
        problems.push("Planting date must be a valid date (YYYY-MM-DD).".to_string());
    }
    if !form.previous_yield.is_empty() && form.previous_yield.parse::<f64>().is_err() {
        problems.push("Previous yield must be a number.".to_string());
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(problems.join("\n"))
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.trim().split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::{CropType, PredictionError, PredictionResult, RequestOutcome};
    use crate::service::MockPredictionService;
    use crate::state::ModelInfo;
    use anyhow::anyhow;
    use crossterm::event::KeyModifiers;
    use serde_json::Map;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn app_with(mock: MockPredictionService) -> App {
        App::with_service(
            Arc::new(mock),
            "http://127.0.0.1:5000".to_string(),
            Duration::from_secs(10),
        )
    }

    async fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
    }

    /// Fill every required field through the key handlers, ending on Name
    async fn fill_form(app: &mut App) {
        type_text(app, "Ada").await; // Name
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        type_text(app, "ada@example.com").await; // Email
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        app.handle_key(key(KeyCode::Right)).await.unwrap(); // Crop: wheat
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        type_text(app, "2024-04-01").await; // Planting date
        app.handle_key(key(KeyCode::BackTab)).await.unwrap();
        app.handle_key(key(KeyCode::BackTab)).await.unwrap();
        app.handle_key(key(KeyCode::BackTab)).await.unwrap();
    }

    fn filled_form() -> FormState {
        FormState {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            crop_type: Some(CropType::Rice),
            planting_date: "2024-04-01".to_string(),
            ..FormState::default()
        }
    }

    #[test]
    fn test_validate_required_accepts_complete_form() {
        assert_eq!(validate_required(&filled_form()), Ok(()));
    }

    #[test]
    fn test_validate_required_lists_missing_fields() {
        let err = validate_required(&FormState::default()).unwrap_err();
        assert!(err.starts_with("Please fill in: Name, Email, Crop Type"));
        assert!(err.contains("Planting Date"));
    }

    #[test]
    fn test_validate_required_checks_formats() {
        let mut form = filled_form();
        form.email = "ada.example.com".to_string();
        form.planting_date = "2024-02-30".to_string();
        form.previous_yield = "1.2.3".to_string();
        let err = validate_required(&form).unwrap_err();
        assert_eq!(err.lines().count(), 3);

        let mut form = filled_form();
        form.previous_yield = "138".to_string();
        assert!(validate_required(&form).is_ok());
    }

    #[test]
    fn test_navigate_mounts_and_unmounts_controller() {
        let mut app = app_with(MockPredictionService::new());
        assert!(app.controller.is_none());

        app.navigate(View::Predict);
        assert!(app.controller.is_some());
        assert_eq!(app.state.current_view, View::Predict);

        app.go_back();
        assert!(app.controller.is_none());
        assert_eq!(app.state.current_view, View::Home);
    }

    #[tokio::test]
    async fn test_typing_updates_controller_form() {
        let mut app = app_with(MockPredictionService::new());
        app.navigate(View::Predict);

        fill_form(&mut app).await;
        // Move to temperature and nudge it up twice
        for _ in 0..5 {
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
        }
        app.handle_key(key(KeyCode::Right)).await.unwrap();
        app.handle_key(key(KeyCode::Right)).await.unwrap();
        // Letters are ignored on sliders
        app.handle_key(key(KeyCode::Char('x'))).await.unwrap();

        let form = app.controller.as_ref().unwrap().form();
        assert_eq!(form.name, "Ada");
        assert_eq!(form.email, "ada@example.com");
        assert_eq!(form.crop_type, Some(CropType::Wheat));
        assert_eq!(form.planting_date, "2024-04-01");
        assert_eq!(form.temperature, 27.0);
    }

    #[tokio::test]
    async fn test_backspace_edits_text_field() {
        let mut app = app_with(MockPredictionService::new());
        app.navigate(View::Predict);
        type_text(&mut app, "Adam").await;
        app.handle_key(key(KeyCode::Backspace)).await.unwrap();
        assert_eq!(app.controller.as_ref().unwrap().form().name, "Ada");
    }

    #[tokio::test]
    async fn test_submit_with_missing_fields_shows_error_and_sends_nothing() {
        let mut mock = MockPredictionService::new();
        mock.expect_predict().never();
        let mut app = app_with(mock);
        app.navigate(View::Predict);

        app.handle_key(ctrl('s')).await.unwrap();

        assert!(app.state.current_error().is_some());
        assert_eq!(
            app.controller.as_ref().unwrap().outcome(),
            &RequestOutcome::Idle
        );

        // Dialog swallows keys until dismissed
        app.handle_key(key(KeyCode::Char('z'))).await.unwrap();
        assert_eq!(app.controller.as_ref().unwrap().form().name, "");
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert!(app.state.current_error().is_none());
    }

    #[tokio::test]
    async fn test_submit_dispatches_and_tick_applies_result() {
        let mut mock = MockPredictionService::new();
        mock.expect_predict().times(1).returning(|_| {
            Ok(PredictionResult {
                total_yield: 50.0,
                yield_per_hectare: 5.0,
                extra: Map::new(),
            })
        });
        let mut app = app_with(mock);
        app.navigate(View::Predict);
        fill_form(&mut app).await;

        app.handle_key(ctrl('s')).await.unwrap();
        assert!(app.controller.as_ref().unwrap().is_pending());
        // Second trigger while pending is ignored
        app.handle_key(ctrl('s')).await.unwrap();

        for _ in 0..100 {
            app.tick();
            if !app.controller.as_ref().unwrap().is_pending() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        let outcome = app.controller.as_ref().unwrap().outcome();
        assert_eq!(outcome.result().map(|r| r.total_yield), Some(50.0));
        assert_eq!(app.status_message.as_deref(), Some("Prediction ready"));
    }

    #[tokio::test]
    async fn test_leaving_predict_discards_in_flight_result() {
        let mut mock = MockPredictionService::new();
        mock.expect_predict()
            .returning(|_| Err(PredictionError::Unreachable));
        let mut app = app_with(mock);
        app.navigate(View::Predict);
        fill_form(&mut app).await;
        app.handle_key(ctrl('s')).await.unwrap();

        app.handle_key(key(KeyCode::Esc)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        app.tick();

        app.navigate(View::Predict);
        app.tick();
        assert_eq!(
            app.controller.as_ref().unwrap().outcome(),
            &RequestOutcome::Idle
        );
    }

    #[tokio::test]
    async fn test_service_view_loads_model_info() {
        let mut mock = MockPredictionService::new();
        mock.expect_health().returning(|| true);
        mock.expect_model_info().returning(|| {
            Ok(ModelInfo {
                supported_crops: vec!["wheat".to_string()],
                ..Default::default()
            })
        });
        let mut app = app_with(mock);

        app.handle_key(key(KeyCode::Char('s'))).await.unwrap();

        assert_eq!(app.state.current_view, View::Service);
        assert!(app.state.service_healthy);
        assert_eq!(
            app.state.model_info.as_ref().map(|i| i.supported_crops.len()),
            Some(1)
        );
    }

    #[tokio::test]
    async fn test_service_view_records_model_info_error() {
        let mut mock = MockPredictionService::new();
        mock.expect_health().returning(|| false);
        mock.expect_model_info()
            .returning(|| Err(anyhow!("connection refused")));
        let mut app = app_with(mock);

        app.open(View::Service).await;

        assert!(!app.state.service_healthy);
        assert!(app.state.model_info.is_none());
        assert_eq!(
            app.state.model_info_error.as_deref(),
            Some("connection refused")
        );
    }

    #[tokio::test]
    async fn test_home_quit() {
        let mut app = app_with(MockPredictionService::new());
        assert!(!app.should_quit());
        app.handle_key(key(KeyCode::Char('q'))).await.unwrap();
        assert!(app.should_quit());
    }
}
