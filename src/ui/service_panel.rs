//! Prediction service status view

use crate::app::App;
use crate::state::ModelInfo;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn heading(text: &str) -> Line<'_> {
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

fn separator() -> Line<'static> {
    Line::from(Span::styled(
        "─".repeat(40),
        Style::default().fg(Color::DarkGray),
    ))
}

/// Draw the service panel
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let label = Style::default().fg(Color::DarkGray);
    let mut content = vec![heading("Service Status"), Line::from("")];

    let (status_text, status_color) = if app.state.service_healthy {
        ("Connected", Color::Green)
    } else {
        ("Disconnected", Color::Red)
    };
    content.push(Line::from(vec![
        Span::styled("Status: ", label),
        Span::styled(
            format!("● {status_text}"),
            Style::default().fg(status_color),
        ),
    ]));
    content.push(Line::from(vec![
        Span::styled("Address: ", label),
        Span::raw(app.service_url.as_str()),
    ]));

    content.push(Line::from(""));
    content.push(separator());
    content.push(Line::from(""));

    match (&app.state.model_info, &app.state.model_info_error) {
        (Some(info), _) => content.extend(model_lines(info)),
        (None, Some(err)) => content.push(Line::from(Span::styled(
            format!("Model info unavailable: {err}"),
            Style::default().fg(Color::Red),
        ))),
        (None, None) => content.push(Line::from(Span::styled("Loading model info...", label))),
    }

    content.push(Line::from(""));
    content.push(Line::from(vec![
        Span::styled("[r]", Style::default().fg(Color::Yellow)),
        Span::raw(" Refresh"),
    ]));

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .title(" Service ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.state.scroll_offset as u16, 0));

    frame.render_widget(paragraph, area);
}

fn model_lines(info: &ModelInfo) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::DarkGray);
    let mut lines = vec![heading("Model"), Line::from("")];

    let crops = if info.supported_crops.is_empty() {
        "none reported".to_string()
    } else {
        info.supported_crops.join(", ")
    };
    lines.push(Line::from(vec![
        Span::styled("Supported crops: ", label),
        Span::raw(crops),
    ]));

    if !info.feature_ranges.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Feature ranges", label)));
        for (name, range) in &info.feature_ranges {
            lines.push(Line::from(format!(
                "  {name:<14} {} – {}",
                range.min, range.max
            )));
        }
    }

    lines.push(Line::from(""));
    let ranked = info.ranked_importance();
    if ranked.is_empty() {
        lines.push(Line::from(Span::styled(
            "Feature importance: model not trained yet",
            label,
        )));
    } else {
        lines.push(Line::from(Span::styled("Feature importance", label)));
        for (name, weight) in ranked {
            lines.push(Line::from(format!("  {name:<24} {weight:>10.4}")));
        }
    }

    lines
}
