//! The name / email / price form

use super::field_renderer::{draw_field, draw_radio_group, FIELD_HEIGHT};
use crate::app::App;
use crate::state::{FieldId, PriceState};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

pub const SUBMIT_TEXT: &str = "Submit!";

/// Draw one text field from the controller
fn draw_form_field(frame: &mut Frame, area: Rect, app: &App, id: FieldId) {
    let form = &app.form;
    if let Some(field) = form.field(id) {
        let is_active = form.active_field() == Some(field.id);
        draw_field(frame, area, field, is_active, form.error_for(id));
    }
}

/// Draw the inputs of the selected price variant
fn draw_price_inputs(frame: &mut Frame, area: Rect, app: &App) {
    match app.form.price_state() {
        PriceState::NoPrice => {}
        PriceState::Fixed => draw_form_field(frame, area, app, FieldId::Amount),
        PriceState::Range => {
            let halves = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(area);
            draw_form_field(frame, halves[0], app, FieldId::MinAmount);
            draw_form_field(frame, halves[1], app, FieldId::MaxAmount);
        }
    }
}

/// Draw the whole form
pub fn draw_form(frame: &mut Frame, area: Rect, app: &App) {
    let price_height = match app.form.price_state() {
        PriceState::NoPrice => 0,
        PriceState::Fixed | PriceState::Range => FIELD_HEIGHT,
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FIELD_HEIGHT),  // Name
            Constraint::Length(FIELD_HEIGHT),  // Email
            Constraint::Length(FIELD_HEIGHT),  // Price type
            Constraint::Length(price_height),  // Amount, or min and max
            Constraint::Length(BUTTON_HEIGHT), // Submit
            Constraint::Min(0),
        ])
        .margin(1)
        .split(area);

    let block = Block::default()
        .title(" Price Form ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    draw_form_field(frame, chunks[0], app, FieldId::Name);
    draw_form_field(frame, chunks[1], app, FieldId::Email);

    let form = &app.form;
    draw_radio_group(
        frame,
        chunks[2],
        form.price_type(),
        form.active_field() == Some(FieldId::PriceType),
        form.error_for(FieldId::PriceType),
    );

    draw_price_inputs(frame, chunks[3], app);

    let button_area = Rect {
        width: chunks[4].width.min(SUBMIT_TEXT.len() as u16 + 4),
        ..chunks[4]
    };
    render_button(frame, button_area, SUBMIT_TEXT, form.is_submit_row_active());
}
