//! Form field value objects

use crate::schema::FieldPath;
use serde_json::{Number, Value};

pub const NAME_PLACEHOLDER: &str = "My Name";
pub const EMAIL_PLACEHOLDER: &str = "me@company.tld";
pub const AMOUNT_PLACEHOLDER: &str = "your amount";
pub const MIN_AMOUNT_PLACEHOLDER: &str = "your minimum";
pub const MAX_AMOUNT_PLACEHOLDER: &str = "your maximum";

/// Identity of every input the form can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Name,
    Email,
    PriceType,
    Amount,
    MinAmount,
    MaxAmount,
}

impl FieldId {
    /// Path of the value this input edits
    pub fn path(&self) -> FieldPath {
        match self {
            Self::Name => FieldPath::from_segments(&["name"]),
            Self::Email => FieldPath::from_segments(&["email"]),
            Self::PriceType => FieldPath::from_segments(&["price", "type"]),
            Self::Amount => FieldPath::from_segments(&["price", "amount"]),
            Self::MinAmount => FieldPath::from_segments(&["price", "amount", "min"]),
            Self::MaxAmount => FieldPath::from_segments(&["price", "amount", "max"]),
        }
    }

    /// Paths whose errors are shown next to this input, most specific first.
    /// The min input also carries the cross-field range error at `price.amount`.
    pub fn error_paths(&self) -> Vec<FieldPath> {
        match self {
            Self::PriceType => vec![self.path(), FieldPath::from_segments(&["price"])],
            Self::MinAmount => vec![self.path(), FieldId::Amount.path()],
            _ => vec![self.path()],
        }
    }

    /// True for the inputs that only exist under a selected price type
    #[cfg(test)]
    pub fn is_price_amount(&self) -> bool {
        matches!(self, Self::Amount | Self::MinAmount | Self::MaxAmount)
    }
}

/// Type-safe field values
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    /// Raw text of a numeric input; converted to a number when read
    Number(String),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// Represents a single text input with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub id: FieldId,
    pub label: String,
    pub placeholder: String,
    pub value: FieldValue,
}

impl FormField {
    /// Create a new text field
    pub fn text(id: FieldId, label: &str, placeholder: &str) -> Self {
        Self {
            id,
            label: label.to_string(),
            placeholder: placeholder.to_string(),
            value: FieldValue::Text(String::new()),
        }
    }

    /// Create a new numeric field
    pub fn number(id: FieldId, label: &str, placeholder: &str) -> Self {
        Self {
            id,
            label: label.to_string(),
            placeholder: placeholder.to_string(),
            value: FieldValue::Number(String::new()),
        }
    }

    /// Get the raw text
    pub fn as_text(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) | FieldValue::Number(s) => s,
        }
    }

    /// Replace the raw text, keeping the field's kind
    pub fn set_text(&mut self, value: impl Into<String>) {
        match &mut self.value {
            FieldValue::Text(s) | FieldValue::Number(s) => *s = value.into(),
        }
    }

    /// Seed a numeric field from a validated number
    pub fn set_number(&mut self, value: f64) {
        self.value = FieldValue::Number(value.to_string());
    }

    /// Clear the field value
    pub fn clear(&mut self) {
        self.set_text(String::new());
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.as_text().is_empty()
    }

    /// Untyped value handed to the schema; `None` leaves the key out.
    ///
    /// Text is passed through verbatim. Numeric text becomes a JSON number
    /// when it parses to a finite value, stays a string otherwise, and is
    /// absent when blank.
    pub fn input_value(&self) -> Option<Value> {
        match &self.value {
            FieldValue::Text(s) => Some(Value::String(s.clone())),
            FieldValue::Number(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                let number = trimmed
                    .parse::<f64>()
                    .ok()
                    .and_then(Number::from_f64)
                    .map(Value::Number);
                Some(number.unwrap_or_else(|| Value::String(s.clone())))
            }
        }
    }
}
