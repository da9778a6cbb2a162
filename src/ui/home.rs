//! Landing view

use crate::app::App;
use crate::state::{View, HOME_MENU};
use crate::ui::components::{render_sidebar_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const TAGLINE: &str = "Growing tomorrow's harvest with today's smart technology";

const DESCRIPTION: &str = "Estimate the expected yield of a crop from its type and the \
growing conditions. Your inputs are sent to the prediction service, which returns the \
total yield for the field and the yield per hectare.";

/// Draw the landing view with its menu
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" AgriYield ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    frame.render_widget(block, area);

    let mut constraints = vec![
        Constraint::Length(3), // Title + tagline
        Constraint::Length(4), // Description
    ];
    constraints.extend(HOME_MENU.iter().map(|_| Constraint::Length(BUTTON_HEIGHT)));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(2)
        .split(area);

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "Agriculture Yield Predictor",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(TAGLINE, Style::default().fg(Color::DarkGray))),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(header, chunks[0]);

    let description = Paragraph::new(DESCRIPTION)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);
    frame.render_widget(description, chunks[1]);

    for (idx, view) in HOME_MENU.iter().enumerate() {
        let (key, label) = match view {
            View::Predict => ('p', "Get Started"),
            View::Service => ('s', "Service Status"),
            View::Home => ('h', "Home"),
        };
        let row = centered(chunks[2 + idx], 32);
        render_sidebar_button(frame, row, key, label, app.state.home_index == idx);
    }
}

fn centered(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}
