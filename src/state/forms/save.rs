//! Seam between the form and whoever stores its result

use crate::schema::Form;

/// Receives a validated form on successful submit.
/// Called synchronously, at most once per submit.
#[cfg_attr(test, mockall::automock)]
pub trait SaveHandler {
    fn save(&mut self, form: Form);
}
