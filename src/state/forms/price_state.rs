//! Price-type sub-state of the form

use super::field::FieldId;
use crate::schema::{Price, PriceType};

/// Which price inputs are live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceState {
    #[default]
    NoPrice,
    Fixed,
    Range,
}

/// Side effect a transition asks the controller to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceEffect {
    /// Drop every error under `price`; the other variant's inputs are hidden
    ClearPriceErrors,
}

impl PriceState {
    /// Initial state for a seed value
    pub fn from_seed(price: Option<&Price>) -> Self {
        match price.map(Price::price_type) {
            None => Self::NoPrice,
            Some(price_type) => Self::from(price_type),
        }
    }

    /// Transition on a price-type selection. Valid from every state.
    pub fn select(self, price_type: PriceType) -> (Self, PriceEffect) {
        (Self::from(price_type), PriceEffect::ClearPriceErrors)
    }

    pub fn price_type(&self) -> Option<PriceType> {
        match self {
            Self::NoPrice => None,
            Self::Fixed => Some(PriceType::Fixed),
            Self::Range => Some(PriceType::Range),
        }
    }

    /// Price inputs rendered in this state
    pub fn amount_fields(&self) -> &'static [FieldId] {
        match self {
            Self::NoPrice => &[],
            Self::Fixed => &[FieldId::Amount],
            Self::Range => &[FieldId::MinAmount, FieldId::MaxAmount],
        }
    }
}

impl From<PriceType> for PriceState {
    fn from(price_type: PriceType) -> Self {
        match price_type {
            PriceType::Fixed => Self::Fixed,
            PriceType::Range => Self::Range,
        }
    }
}
