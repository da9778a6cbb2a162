//! Field rendering utilities for forms

use crate::prediction::CropType;
use crate::state::SliderSpec;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const CURSOR: &str = "▌";

fn field_styles(is_active: bool) -> (Style, Style) {
    if is_active {
        (
            Style::default().fg(Color::Cyan),
            Style::default().fg(Color::Cyan),
        )
    } else {
        (
            Style::default().fg(Color::White),
            Style::default().fg(Color::DarkGray),
        )
    }
}

fn field_block(label: &str, border_style: Style) -> Block<'_> {
    Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Draw a single-line text field
pub fn draw_text_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    placeholder: &str,
    is_active: bool,
) {
    let (style, border_style) = field_styles(is_active);

    let mut spans = if value.is_empty() && !is_active {
        vec![Span::styled(placeholder, Style::default().fg(Color::DarkGray))]
    } else {
        vec![Span::styled(value, style)]
    };
    if is_active {
        spans.push(Span::styled(CURSOR, Style::default().fg(Color::Cyan)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(field_block(label, border_style));
    frame.render_widget(paragraph, area);
}

/// Draw the crop selector
pub fn draw_select_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: Option<CropType>,
    is_active: bool,
) {
    let (style, border_style) = field_styles(is_active);

    let shown = match value {
        Some(crop) => Span::styled(crop.label(), style),
        None => Span::styled("Select Crop", Style::default().fg(Color::DarkGray)),
    };
    let line = if is_active {
        Line::from(vec![
            Span::styled("◀ ", style),
            shown,
            Span::styled(" ▶", style),
        ])
    } else {
        Line::from(shown)
    };

    let paragraph = Paragraph::new(line).block(field_block(label, border_style));
    frame.render_widget(paragraph, area);
}

/// Draw a slider as a text bar with its current value in the title
pub fn draw_slider_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: f64,
    slider: SliderSpec,
    is_active: bool,
) {
    let (style, border_style) = field_styles(is_active);

    // Inside the borders
    let bar_width = area.width.saturating_sub(2) as usize;
    let bar = slider_bar(value, slider, bar_width);

    let title = format!("{label}: {value}");
    let paragraph = Paragraph::new(Line::from(Span::styled(bar, style)))
        .block(field_block(&title, border_style));
    frame.render_widget(paragraph, area);
}

/// Text rendering of a slider position, `width` characters wide
fn slider_bar(value: f64, slider: SliderSpec, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let span = (slider.max - slider.min).max(f64::EPSILON);
    let ratio = ((value - slider.min) / span).clamp(0.0, 1.0);
    let knob = ((width - 1) as f64 * ratio).round() as usize;

    (0..width)
        .map(|i| match i.cmp(&knob) {
            std::cmp::Ordering::Less => '━',
            std::cmp::Ordering::Equal => '●',
            std::cmp::Ordering::Greater => '─',
        })
        .collect()
}

/// Draw a line of key hints
pub fn draw_help_text(frame: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, action) in hints {
        spans.push(Span::styled(*key, Style::default().fg(Color::Cyan)));
        spans.push(Span::raw(format!(": {action}  ")));
    }
    let help = Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}
