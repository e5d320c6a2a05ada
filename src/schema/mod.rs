//! Validation schema
//!
//! Turns untyped input into a validated [`Form`] or a list of path-scoped
//! issues. Parsing is pure and synchronous.

mod form_schema;
mod issue;
mod model;
mod rules;

pub use form_schema::FormSchema;
pub use issue::{FieldPath, ValidationErrors};
pub use model::{Form, Price, PriceType, RangeAmount, UnknownPriceType};

#[cfg(test)]
pub use form_schema::RANGE_ORDER_MESSAGE;
