//! Validated form values

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A fully validated form, as handed to the save handler.
///
/// Also used as the seed for the working state, where any subset of fields
/// may be given.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Form {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
}

/// Price, discriminated on `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Price {
    Fixed { amount: f64 },
    Range { amount: RangeAmount },
}

impl Price {
    pub fn price_type(&self) -> PriceType {
        match self {
            Price::Fixed { .. } => PriceType::Fixed,
            Price::Range { .. } => PriceType::Range,
        }
    }
}

/// Bounds of a ranged price. `max >= min` for every value the schema produces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeAmount {
    pub min: f64,
    pub max: f64,
}

/// The closed set of price discriminants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceType {
    Fixed,
    Range,
}

impl PriceType {
    /// Every discriminant, in display order
    pub const ALL: [PriceType; 2] = [PriceType::Fixed, PriceType::Range];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Range => "range",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Fixed => "Fixed",
            Self::Range => "Range",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            Self::Fixed => Self::Range,
            Self::Range => Self::Fixed,
        }
    }
}

impl fmt::Display for PriceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A discriminant outside the closed `fixed | range` set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown price type `{0}`, expected one of: fixed, range")]
pub struct UnknownPriceType(pub String);

impl FromStr for PriceType {
    type Err = UnknownPriceType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed" => Ok(Self::Fixed),
            "range" => Ok(Self::Range),
            other => Err(UnknownPriceType(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_price_type_from_str() {
        assert_eq!("fixed".parse::<PriceType>(), Ok(PriceType::Fixed));
        assert_eq!("range".parse::<PriceType>(), Ok(PriceType::Range));
    }

    #[test]
    fn test_price_type_rejects_unknown() {
        let err = "Fixed".parse::<PriceType>().unwrap_err();
        assert_eq!(err, UnknownPriceType("Fixed".to_string()));
        assert!(err.to_string().contains("`Fixed`"));
    }

    #[test]
    fn test_price_type_toggle() {
        assert_eq!(PriceType::Fixed.toggle(), PriceType::Range);
        assert_eq!(PriceType::Range.toggle(), PriceType::Fixed);
    }

    #[test]
    fn test_form_serializes_without_price() {
        let form = Form {
            name: "John".to_string(),
            email: "test@test.com".to_string(),
            price: None,
        };
        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(value, json!({"name": "John", "email": "test@test.com"}));
    }

    #[test]
    fn test_price_is_tagged_on_type() {
        let price = Price::Range {
            amount: RangeAmount {
                min: 1.0,
                max: 10.0,
            },
        };
        let value = serde_json::to_value(&price).unwrap();
        assert_eq!(
            value,
            json!({"type": "range", "amount": {"min": 1.0, "max": 10.0}})
        );
    }

    #[test]
    fn test_price_deserialize_rejects_unknown_tag() {
        let result: Result<Price, _> =
            serde_json::from_value(json!({"type": "hourly", "amount": 5}));
        assert!(result.is_err());
    }

    #[test]
    fn test_partial_seed_deserializes() {
        let form: Form = serde_json::from_value(json!({"email": "a@b.co"})).unwrap();
        assert_eq!(form.name, "");
        assert_eq!(form.email, "a@b.co");
        assert_eq!(form.price, None);
    }

    #[test]
    fn test_price_type_of_variant() {
        assert_eq!(Price::Fixed { amount: 1.0 }.price_type(), PriceType::Fixed);
    }
}
