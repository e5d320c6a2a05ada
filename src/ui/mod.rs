//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;

use crate::app::App;
use crate::state::Dialog;
use components::{render_error_dialog, render_saved_dialog};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let main_area = layout::create_layout(frame.area());

    forms::draw_form(frame, main_area, app);
    layout::draw_status_bar(frame, app);

    // Dialogs overlay everything else
    match app.state.current_dialog() {
        Some(Dialog::Error { message }) => render_error_dialog(frame, &message),
        Some(Dialog::Saved { summary }) => render_saved_dialog(frame, &summary),
        None => {}
    }
}
