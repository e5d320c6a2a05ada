//! Field rendering utilities for forms

use crate::schema::PriceType;
use crate::state::FormField;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by one field: bordered box plus the error line
pub const FIELD_HEIGHT: u16 = 4;

fn border_style(is_active: bool, has_error: bool) -> Style {
    if has_error {
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Split a field area into the input box and the error line below it
fn split_field_area(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(area);
    (chunks[0], chunks[1])
}

fn draw_error_line(frame: &mut Frame, area: Rect, error: Option<&str>) {
    if let Some(message) = error {
        let line = Paragraph::new(Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(Color::Red),
        )));
        frame.render_widget(line, area);
    }
}

/// Draw a text input with its label, placeholder and error
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    is_active: bool,
    error: Option<&str>,
) {
    let (input_area, error_area) = split_field_area(area);

    let value = field.as_text();
    let cursor = if is_active { "▌" } else { "" };
    let content = if value.is_empty() && !is_active {
        Line::from(Span::styled(
            field.placeholder.as_str(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))
    } else {
        let style = if is_active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::styled(value, style),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ])
    };

    let block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(border_style(is_active, error.is_some()));

    frame.render_widget(Paragraph::new(content).block(block), input_area);
    draw_error_line(frame, error_area, error);
}

/// Draw the price type radio group
pub fn draw_radio_group(
    frame: &mut Frame,
    area: Rect,
    selected: Option<PriceType>,
    is_active: bool,
    error: Option<&str>,
) {
    let (input_area, error_area) = split_field_area(area);

    let mut spans = Vec::new();
    for price_type in PriceType::ALL {
        let is_selected = selected == Some(price_type);
        let marker = if is_selected { "(•)" } else { "( )" };
        let style = if is_selected {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        spans.push(Span::styled(
            format!("{marker} {}", price_type.label()),
            style,
        ));
        spans.push(Span::raw("  "));
    }

    let block = Block::default()
        .title(" Price Type ")
        .borders(Borders::ALL)
        .border_style(border_style(is_active, error.is_some()));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), input_area);
    draw_error_line(frame, error_area, error);
}
