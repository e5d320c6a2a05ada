//! Application state definitions

use crate::schema::Form;
use crate::state::forms::SaveHandler;
use std::collections::VecDeque;

/// Overlay shown above the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    /// Confirmation after a successful save, with the saved JSON
    Saved { summary: String },
    /// An error the user must acknowledge
    Error { message: String },
}

/// Host-side state around the form
#[derive(Debug, Default)]
pub struct AppState {
    /// Pending error messages, shown one at a time
    pub error_queue: VecDeque<String>,
    /// Confirmation of the last save
    pub saved_summary: Option<String>,
    /// One-line status shown in the status bar
    pub status_message: Option<String>,
}

impl AppState {
    /// Push an error message to the queue
    pub fn push_error(&mut self, message: String) {
        tracing::warn!("{message}");
        self.error_queue.push_back(message);
    }

    /// Dialog to render, errors first
    pub fn current_dialog(&self) -> Option<Dialog> {
        if let Some(message) = self.error_queue.front() {
            return Some(Dialog::Error {
                message: message.clone(),
            });
        }
        self.saved_summary
            .as_ref()
            .map(|summary| Dialog::Saved {
                summary: summary.clone(),
            })
    }

    pub fn has_dialog(&self) -> bool {
        !self.error_queue.is_empty() || self.saved_summary.is_some()
    }

    /// Dismiss the dialog currently shown
    pub fn dismiss_dialog(&mut self) {
        if self.error_queue.pop_front().is_none() {
            self.saved_summary = None;
        }
    }
}

/// The host's save callback: keeps the last saved form and logs each save
#[derive(Debug, Default)]
pub struct SubmissionLog {
    last: Option<Form>,
    count: usize,
}

impl SubmissionLog {
    pub fn last(&self) -> Option<&Form> {
        self.last.as_ref()
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl SaveHandler for SubmissionLog {
    fn save(&mut self, form: Form) {
        self.count += 1;
        match serde_json::to_string(&form) {
            Ok(json) => tracing::info!(count = self.count, form = %json, "form saved"),
            Err(err) => tracing::warn!(count = self.count, "form saved but not serializable: {err}"),
        }
        self.last = Some(form);
    }
}
