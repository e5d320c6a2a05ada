//! Layout components (content area, status bar)

use crate::app::App;
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::FieldId;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Create the main layout, reserving the bottom line for the status bar
pub fn create_layout(area: Rect) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    chunks[0]
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![Span::styled(
        format!(" {}", key_hints(app)),
        Style::default().fg(Color::Gray),
    )];

    if let Some(msg) = &app.state.status_message {
        let color = if app.form.errors().is_empty() {
            Color::Green
        } else {
            Color::Red
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(color)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);
}

/// Keyboard hints for the focused element
fn key_hints(app: &App) -> String {
    if app.state.has_dialog() {
        return "Enter/Esc:dismiss".to_string();
    }
    if app.form.is_submit_row_active() {
        return format!("Enter:submit  {SUBMIT_SHORTCUT}:submit  Tab:next  Esc:quit");
    }
    match app.form.active_field() {
        Some(FieldId::PriceType) => {
            format!("←/→:choose  Space:toggle  Tab:next  {SUBMIT_SHORTCUT}:submit  Esc:quit")
        }
        _ => format!("Tab:next  {SUBMIT_SHORTCUT}:submit  Esc:quit"),
    }
}
