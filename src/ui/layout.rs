//! Layout components (sidebar, status bar)

use super::components::{render_button, BUTTON_HEIGHT};
use crate::app::App;
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Sidebar entries, top to bottom
const SIDEBAR_ITEMS: [View; 3] = [View::Home, View::Predict, View::Service];

/// Split the screen into sidebar and main content, leaving the last row for the status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(16), // Sidebar
            Constraint::Min(0),     // Main content
        ])
        .split(rows[0]);

    (columns[0], columns[1])
}

/// Draw the sidebar, highlighting the current view
pub fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let mut constraints = vec![Constraint::Min(0)];
    constraints.extend(SIDEBAR_ITEMS.iter().map(|_| Constraint::Length(BUTTON_HEIGHT)));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (idx, view) in SIDEBAR_ITEMS.iter().enumerate() {
        let is_selected = app.state.current_view == *view;
        render_button(frame, chunks[idx + 1], view.title(), is_selected, true);
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![if app.state.service_healthy {
        Span::styled(" ● ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" ○ ", Style::default().fg(Color::Red))
    }];

    spans.push(Span::styled(
        view_hints(app.state.current_view),
        Style::default().fg(Color::Gray),
    ));

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg.as_str(), Style::default().fg(Color::Green)));
    }

    spans.push(Span::raw(" | "));
    spans.push(Span::styled(
        app.service_url.as_str(),
        Style::default().fg(Color::Blue),
    ));

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    let quit_hint = " ^C:quit ";
    let quit_width = quit_hint.len() as u16;
    let quit_area = Rect {
        x: status_area.x + status_area.width.saturating_sub(quit_width),
        width: quit_width.min(status_area.width),
        ..status_area
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Keyboard hints for the current view
fn view_hints(view: View) -> String {
    match view {
        View::Home => "j/k:nav  Enter:open  p:predict  s:service  q:quit".to_string(),
        View::Predict => format!(
            "Tab:next  ←/→:adjust  {}:submit  Esc:back",
            crate::platform::SUBMIT_SHORTCUT
        ),
        View::Service => "r:refresh  j/k:scroll  Esc:back".to_string(),
    }
}
