//! Form domain layer
//!
//! Working values, error state and the price-type state machine behind the
//! rendered form. Validation itself lives in [`crate::schema`].

mod errors;
mod field;
mod form_state;
mod price_state;
mod save;

pub use field::{FieldId, FormField};
pub use form_state::{FormController, SubmitOutcome};
pub use price_state::PriceState;
pub use save::SaveHandler;
