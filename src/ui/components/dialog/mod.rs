//! Dialog components for TUI

mod base;
mod error_dialog;
mod saved_dialog;

pub use error_dialog::render_error_dialog;
pub use saved_dialog::render_saved_dialog;
