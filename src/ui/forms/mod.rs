//! Form rendering

mod field_renderer;
mod price_form;

pub use price_form::draw_form;
