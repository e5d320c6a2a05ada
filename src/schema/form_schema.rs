//! The form schema: name, email and an optional discriminated price

use super::issue::{FieldPath, Issue, IssueKind, ValidationErrors, ValueKind};
use super::model::{Form, Price, PriceType, RangeAmount};
use super::rules::{expect_object, NumberSchema, ParseContext, Schema, StringSchema};
use serde_json::Value;

/// Message for the range refinement, reported at `price.amount`
pub const RANGE_ORDER_MESSAGE: &str = "Min must be less than max";

pub const NAME_MIN_LEN: usize = 1;
pub const NAME_MAX_LEN: usize = 10;

/// `{ min: number, max: number }` with `max >= min`
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeAmountSchema;

impl Schema for RangeAmountSchema {
    type Output = RangeAmount;

    fn parse_at(
        &self,
        input: Option<&Value>,
        path: &FieldPath,
        ctx: &mut ParseContext,
    ) -> Option<RangeAmount> {
        let map = expect_object(input, path, ctx)?;
        let min = NumberSchema.parse_at(map.get("min"), &path.child("min"), ctx);
        let max = NumberSchema.parse_at(map.get("max"), &path.child("max"), ctx);
        Some(RangeAmount {
            min: min?,
            max: max?,
        })
    }
}

/// Discriminated union over `price.type`
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceSchema;

impl Schema for PriceSchema {
    type Output = Price;

    fn parse_at(
        &self,
        input: Option<&Value>,
        path: &FieldPath,
        ctx: &mut ParseContext,
    ) -> Option<Price> {
        let map = expect_object(input, path, ctx)?;

        let discriminant = map
            .get("type")
            .and_then(Value::as_str)
            .and_then(|tag| tag.parse::<PriceType>().ok());
        let Some(price_type) = discriminant else {
            ctx.report(
                &path.child("type"),
                IssueKind::InvalidDiscriminator {
                    options: PriceType::ALL.iter().map(PriceType::as_str).collect(),
                },
            );
            return None;
        };

        let amount_path = path.child("amount");
        match price_type {
            PriceType::Fixed => NumberSchema
                .parse_at(map.get("amount"), &amount_path, ctx)
                .map(|amount| Price::Fixed { amount }),
            PriceType::Range => RangeAmountSchema
                .refine(|range| range.max >= range.min, RANGE_ORDER_MESSAGE)
                .parse_at(map.get("amount"), &amount_path, ctx)
                .map(|amount| Price::Range { amount }),
        }
    }
}

/// Validates untyped input into a [`Form`]
pub struct FormSchema {
    name: StringSchema,
    email: StringSchema,
}

impl Default for FormSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl FormSchema {
    pub fn new() -> Self {
        Self {
            name: StringSchema::new().min(NAME_MIN_LEN).max(NAME_MAX_LEN),
            email: StringSchema::new().email(),
        }
    }

    /// Parse without panicking: a normalized [`Form`] or every issue found
    pub fn safe_parse(&self, input: &Value) -> Result<Form, ValidationErrors> {
        let mut ctx = ParseContext::new();
        let root = FieldPath::root();
        let parsed = self.parse_at(Some(input), &root, &mut ctx);
        match ValidationErrors::from_issues(ctx.into_issues()) {
            Some(errors) => Err(errors),
            None => parsed.ok_or_else(|| {
                ValidationErrors::single(Issue::new(
                    root,
                    IssueKind::InvalidType {
                        expected: ValueKind::Object,
                        received: ValueKind::of(input),
                    },
                ))
            }),
        }
    }
}

impl Schema for FormSchema {
    type Output = Form;

    fn parse_at(
        &self,
        input: Option<&Value>,
        path: &FieldPath,
        ctx: &mut ParseContext,
    ) -> Option<Form> {
        let map = expect_object(input, path, ctx)?;
        let name = self.name.parse_at(map.get("name"), &path.child("name"), ctx);
        let email = self.email.parse_at(map.get("email"), &path.child("email"), ctx);
        let price = PriceSchema
            .optional()
            .parse_at(map.get("price"), &path.child("price"), ctx);

        Some(Form {
            name: name?,
            email: email?,
            price: price?,
        })
    }
}
