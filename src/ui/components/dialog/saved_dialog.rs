//! Dialog shown after the form was saved

use super::base::{dismiss_hint, render_dialog, DialogConfig};
use ratatui::{style::Color, Frame};

/// Render the saved form as pretty JSON
pub fn render_saved_dialog(frame: &mut Frame, summary: &str) {
    render_dialog(
        frame,
        DialogConfig {
            title: "Saved",
            title_color: Color::Green,
            border_color: Color::Green,
            message: summary,
            hint: Some(dismiss_hint()),
            max_width: 60,
        },
    );
}
