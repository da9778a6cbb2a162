//! Prediction form and result panel

use super::field_renderer::{
    draw_help_text, draw_select_field, draw_slider_field, draw_text_field,
};
use crate::app::App;
use crate::prediction::{PredictionResult, RequestOutcome};
use crate::state::{FieldKey, FormState};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const FIELD_HEIGHT: u16 = 3;

/// Draw the prediction form for the mounted controller
pub fn draw_prediction_form(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Yield Prediction Form ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    frame.render_widget(block, area);

    let Some(controller) = app.controller.as_ref() else {
        return;
    };
    let form = controller.form();
    let outcome = controller.outcome();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FIELD_HEIGHT),  // Name | Email
            Constraint::Length(FIELD_HEIGHT),  // Crop | Planting date
            Constraint::Length(FIELD_HEIGHT),  // Previous yield
            Constraint::Length(FIELD_HEIGHT),  // Temperature | Rainfall
            Constraint::Length(BUTTON_HEIGHT), // Submit
            Constraint::Min(4),                // Outcome
            Constraint::Length(1),             // Help
        ])
        .margin(1)
        .split(area);

    let focused = app.state.focused_field();
    let pairs = [
        (rows[0], FieldKey::Name, Some(FieldKey::Email)),
        (rows[1], FieldKey::CropType, Some(FieldKey::PlantingDate)),
        (rows[2], FieldKey::PreviousYield, None),
        (rows[3], FieldKey::Temperature, Some(FieldKey::Rainfall)),
    ];
    for (row, left, right) in pairs {
        match right {
            Some(right) => {
                let halves = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(row);
                draw_form_field(frame, halves[0], form, left, focused == Some(left));
                draw_form_field(frame, halves[1], form, right, focused == Some(right));
            }
            None => draw_form_field(frame, row, form, left, focused == Some(left)),
        }
    }

    let pending = outcome.is_pending();
    let label = if pending {
        "Calculating..."
    } else {
        "Submit and View Predictions"
    };
    render_button(
        frame,
        rows[4],
        label,
        app.state.is_submit_focused(),
        !pending,
    );

    draw_outcome(frame, rows[5], outcome);

    draw_help_text(
        frame,
        rows[6],
        &[
            ("Tab", "next field"),
            ("←/→", "adjust"),
            (crate::platform::SUBMIT_SHORTCUT, "submit"),
            (crate::platform::COPY_SHORTCUT, "copy result"),
            ("Esc", "back"),
        ],
    );
}

fn draw_form_field(
    frame: &mut Frame,
    area: Rect,
    form: &FormState,
    key: FieldKey,
    active: bool,
) {
    match key {
        FieldKey::CropType => {
            draw_select_field(frame, area, key.label(), form.crop_type, active)
        }
        FieldKey::Temperature | FieldKey::Rainfall => {
            let Some(slider) = key.slider() else {
                return;
            };
            let value = form.slider_value(key).unwrap_or(slider.min);
            draw_slider_field(frame, area, key.label(), value, slider, active);
        }
        _ => {
            let placeholder = match key {
                FieldKey::PlantingDate => "YYYY-MM-DD",
                FieldKey::PreviousYield => "138",
                _ => "(required)",
            };
            draw_text_field(
                frame,
                area,
                key.label(),
                &form.raw_value(key),
                placeholder,
                active,
            );
        }
    }
}

fn draw_outcome(frame: &mut Frame, area: Rect, outcome: &RequestOutcome) {
    let (title, color, lines) = match outcome {
        RequestOutcome::Idle => (
            " Results ",
            Color::DarkGray,
            vec![Line::from(
                "Fill in the form and submit to see the predicted yield.",
            )],
        ),
        RequestOutcome::Pending => (
            " Results ",
            Color::Yellow,
            vec![Line::from(Span::styled(
                "Calculating...",
                Style::default().fg(Color::Yellow),
            ))],
        ),
        RequestOutcome::Failure(err) => (
            " Error ",
            Color::Red,
            vec![Line::from(Span::styled(
                err.to_string(),
                Style::default().fg(Color::Red),
            ))],
        ),
        RequestOutcome::Success(result) => {
            (" Prediction Results ", Color::Green, result_lines(result))
        }
    };

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
    frame.render_widget(paragraph, area);
}

fn result_lines(result: &PredictionResult) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD);
    vec![
        Line::from(vec![
            Span::styled("Total Yield:       ", label),
            Span::styled(format!("{} tons", result.total_yield), value),
        ]),
        Line::from(vec![
            Span::styled("Yield per Hectare: ", label),
            Span::styled(format!("{} tons/ha", result.yield_per_hectare), value),
        ]),
    ]
}
