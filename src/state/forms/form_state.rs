//! Form controller: working values, error state, price sub-state and submit

use super::errors::FieldErrors;
use super::field::{
    FieldId, FormField, AMOUNT_PLACEHOLDER, EMAIL_PLACEHOLDER, MAX_AMOUNT_PLACEHOLDER,
    MIN_AMOUNT_PLACEHOLDER, NAME_PLACEHOLDER,
};
use super::price_state::{PriceEffect, PriceState};
use super::save::SaveHandler;
use crate::schema::{
    FieldPath, Form, FormSchema, Price, PriceType, RangeAmount, UnknownPriceType,
    ValidationErrors,
};
use serde_json::{Map, Value};

/// Result of one submit
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The form was valid and handed to the save handler
    Saved(Form),
    /// Validation failed; the error map now holds these issues
    Rejected(ValidationErrors),
}

/// Owns the working (possibly invalid) form state for one mounted form
pub struct FormController<S: SaveHandler> {
    pub name: FormField,
    pub email: FormField,
    pub fixed_amount: FormField,
    pub min_amount: FormField,
    pub max_amount: FormField,
    price_state: PriceState,
    errors: FieldErrors,
    /// Index into `visible_fields()`; one past the end is the submit row
    pub active_field_index: usize,
    schema: FormSchema,
    save: S,
}

impl<S: SaveHandler> FormController<S> {
    /// Create a controller seeded from `seed`
    pub fn new(seed: &Form, save: S) -> Self {
        let mut controller = Self {
            name: FormField::text(FieldId::Name, "Name", NAME_PLACEHOLDER),
            email: FormField::text(FieldId::Email, "Email", EMAIL_PLACEHOLDER),
            fixed_amount: FormField::number(FieldId::Amount, "Amount", AMOUNT_PLACEHOLDER),
            min_amount: FormField::number(FieldId::MinAmount, "Min", MIN_AMOUNT_PLACEHOLDER),
            max_amount: FormField::number(FieldId::MaxAmount, "Max", MAX_AMOUNT_PLACEHOLDER),
            price_state: PriceState::NoPrice,
            errors: FieldErrors::default(),
            active_field_index: 0,
            schema: FormSchema::new(),
            save,
        };
        controller.reset(seed);
        controller
    }

    /// Replace all working state with `seed`, dropping errors and focus
    pub fn reset(&mut self, seed: &Form) {
        self.name.set_text(seed.name.as_str());
        self.email.set_text(seed.email.as_str());
        self.fixed_amount.clear();
        self.min_amount.clear();
        self.max_amount.clear();
        match &seed.price {
            None => {}
            Some(Price::Fixed { amount }) => self.fixed_amount.set_number(*amount),
            Some(Price::Range {
                amount: RangeAmount { min, max },
            }) => {
                self.min_amount.set_number(*min);
                self.max_amount.set_number(*max);
            }
        }
        self.price_state = PriceState::from_seed(seed.price.as_ref());
        self.errors.clear();
        self.active_field_index = 0;
        tracing::debug!(price_state = ?self.price_state, "form seeded");
    }

    pub fn price_state(&self) -> PriceState {
        self.price_state
    }

    pub fn price_type(&self) -> Option<PriceType> {
        self.price_state.price_type()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn save_handler(&self) -> &S {
        &self.save
    }

    /// Every input to render, in order
    pub fn visible_fields(&self) -> Vec<FieldId> {
        let mut fields = vec![FieldId::Name, FieldId::Email, FieldId::PriceType];
        fields.extend_from_slice(self.price_state.amount_fields());
        fields
    }

    /// Text input backing `id`; `None` for the price-type selector
    pub fn field(&self, id: FieldId) -> Option<&FormField> {
        match id {
            FieldId::Name => Some(&self.name),
            FieldId::Email => Some(&self.email),
            FieldId::PriceType => None,
            FieldId::Amount => Some(&self.fixed_amount),
            FieldId::MinAmount => Some(&self.min_amount),
            FieldId::MaxAmount => Some(&self.max_amount),
        }
    }

    fn field_mut(&mut self, id: FieldId) -> Option<&mut FormField> {
        match id {
            FieldId::Name => Some(&mut self.name),
            FieldId::Email => Some(&mut self.email),
            FieldId::PriceType => None,
            FieldId::Amount => Some(&mut self.fixed_amount),
            FieldId::MinAmount => Some(&mut self.min_amount),
            FieldId::MaxAmount => Some(&mut self.max_amount),
        }
    }

    /// Update one leaf. Does not validate.
    ///
    /// For [`FieldId::PriceType`] the value must name a price type and the
    /// call behaves like [`Self::select_price_type`].
    pub fn set_field(&mut self, id: FieldId, value: &str) -> Result<(), UnknownPriceType> {
        match self.field_mut(id) {
            Some(field) => field.set_text(value),
            None => self.select_price_type(value.parse()?),
        }
        Ok(())
    }

    /// Select the price type; clears every error under `price`
    pub fn select_price_type(&mut self, price_type: PriceType) {
        let (next, effect) = self.price_state.select(price_type);
        tracing::debug!(from = ?self.price_state, to = ?next, "price type selected");
        self.price_state = next;
        match effect {
            PriceEffect::ClearPriceErrors => {
                self.errors.clear_under(&FieldPath::from_segments(&["price"]))
            }
        }
        self.clamp_focus();
    }

    /// Error to display next to `id`
    pub fn error_for(&self, id: FieldId) -> Option<&str> {
        id.error_paths()
            .iter()
            .find_map(|path| self.errors.get(path))
    }

    /// Untyped snapshot of the working values, as the schema sees them
    pub fn to_input(&self) -> Value {
        let mut map = Map::new();
        map.insert("name".to_string(), self.name.input_value().unwrap_or(Value::Null));
        map.insert("email".to_string(), self.email.input_value().unwrap_or(Value::Null));

        let price = match self.price_state {
            PriceState::NoPrice => None,
            PriceState::Fixed => {
                let mut price = Map::new();
                price.insert("type".to_string(), Value::from(PriceType::Fixed.as_str()));
                if let Some(amount) = self.fixed_amount.input_value() {
                    price.insert("amount".to_string(), amount);
                }
                Some(price)
            }
            PriceState::Range => {
                let mut amount = Map::new();
                if let Some(min) = self.min_amount.input_value() {
                    amount.insert("min".to_string(), min);
                }
                if let Some(max) = self.max_amount.input_value() {
                    amount.insert("max".to_string(), max);
                }
                let mut price = Map::new();
                price.insert("type".to_string(), Value::from(PriceType::Range.as_str()));
                price.insert("amount".to_string(), Value::Object(amount));
                Some(price)
            }
        };
        if let Some(price) = price {
            map.insert("price".to_string(), Value::Object(price));
        }

        Value::Object(map)
    }

    /// Validate the working values; save on success, record errors otherwise
    pub fn submit(&mut self) -> SubmitOutcome {
        match self.schema.safe_parse(&self.to_input()) {
            Ok(form) => {
                tracing::info!(name = %form.name, "form submitted");
                self.save.save(form.clone());
                SubmitOutcome::Saved(form)
            }
            Err(errors) => {
                tracing::debug!(issues = errors.issues().len(), "form rejected");
                self.errors = FieldErrors::from_validation(&errors);
                SubmitOutcome::Rejected(errors)
            }
        }
    }

    // Focus handling

    /// Visible fields plus the submit row
    pub fn focus_count(&self) -> usize {
        self.visible_fields().len() + 1
    }

    pub fn active_field(&self) -> Option<FieldId> {
        self.visible_fields().get(self.active_field_index).copied()
    }

    /// Returns true if the submit row is currently active
    pub fn is_submit_row_active(&self) -> bool {
        self.active_field_index == self.focus_count() - 1
    }

    pub fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.focus_count() - 1);
    }

    pub fn next_field(&mut self) {
        self.active_field_index = (self.active_field_index + 1) % self.focus_count();
    }

    pub fn prev_field(&mut self) {
        if self.active_field_index == 0 {
            self.active_field_index = self.focus_count() - 1;
        } else {
            self.active_field_index -= 1;
        }
    }

    fn clamp_focus(&mut self) {
        self.set_active_field(self.active_field_index);
    }

    /// Append a typed character to the focused text input
    pub fn push_char(&mut self, c: char) {
        self.edit_focused(|text| text.push(c));
    }

    /// Remove the last character of the focused text input
    pub fn pop_char(&mut self) {
        self.edit_focused(|text| {
            text.pop();
        });
    }

    /// Apply `edit` to the focused text input's value through [`Self::set_field`]
    fn edit_focused(&mut self, edit: impl FnOnce(&mut String)) {
        let Some(field) = self.active_field().and_then(|id| self.field(id)) else {
            return;
        };
        let id = field.id;
        let mut text = field.as_text().to_string();
        edit(&mut text);
        if let Err(err) = self.set_field(id, &text) {
            tracing::warn!(%err, field = ?id, "edit rejected");
        }
    }
}
