//! UI module for rendering the TUI

mod components;
mod forms;
mod home;
mod layout;
mod service_panel;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (sidebar_area, main_area) = layout::create_layout(frame.area());

    layout::draw_sidebar(frame, sidebar_area, app);

    match app.state.current_view {
        View::Home => home::draw(frame, main_area, app),
        View::Predict => forms::draw_prediction_form(frame, main_area, app),
        View::Service => service_panel::draw(frame, main_area, app),
    }

    layout::draw_status_bar(frame, app);

    // Error dialog overlays everything
    if let Some(message) = app.state.current_error() {
        components::render_error_dialog(frame, message);
    }
}
