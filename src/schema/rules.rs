//! Composable schema pieces
//!
//! Each [`Schema`] parses an untyped JSON value found at a [`FieldPath`],
//! reporting issues into a shared [`ParseContext`]. A parse that cannot
//! produce a value returns `None`; callers keep going with sibling fields so
//! independent fields each report their own issues.

use super::issue::{FieldPath, Issue, IssueKind, ValueKind};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

/// Collects issues for one parse
#[derive(Debug, Default)]
pub struct ParseContext {
    issues: Vec<Issue>,
}

impl ParseContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, path: &FieldPath, kind: IssueKind) {
        self.issues.push(Issue::new(path.clone(), kind));
    }

    #[cfg(test)]
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }
}

/// A declarative description of one value
pub trait Schema {
    type Output;

    /// Parse `input` (`None` when the key is absent) located at `path`
    fn parse_at(
        &self,
        input: Option<&Value>,
        path: &FieldPath,
        ctx: &mut ParseContext,
    ) -> Option<Self::Output>;

    /// Accept an absent value as `None`
    fn optional(self) -> Optional<Self>
    where
        Self: Sized,
    {
        Optional(self)
    }

    /// Add a whole-value rule that runs only once this schema parsed cleanly.
    /// A failing predicate reports `message` at this schema's own path.
    fn refine<F>(self, predicate: F, message: &'static str) -> Refined<Self, F>
    where
        Self: Sized,
        F: Fn(&Self::Output) -> bool,
    {
        Refined {
            inner: self,
            predicate,
            message,
        }
    }
}

/// Report a missing or mistyped value
fn report_type(
    input: Option<&Value>,
    expected: ValueKind,
    path: &FieldPath,
    ctx: &mut ParseContext,
) {
    match input {
        None => ctx.report(path, IssueKind::Required { expected }),
        Some(value) => ctx.report(
            path,
            IssueKind::InvalidType {
                expected,
                received: ValueKind::of(value),
            },
        ),
    }
}

/// Require an object at `path`
pub fn expect_object<'v>(
    input: Option<&'v Value>,
    path: &FieldPath,
    ctx: &mut ParseContext,
) -> Option<&'v Map<String, Value>> {
    match input {
        Some(Value::Object(map)) => Some(map),
        other => {
            report_type(other, ValueKind::Object, path, ctx);
            None
        }
    }
}

// Local part, `@`, dot-separated labels, alphabetic TLD. The "no leading dot"
// and "no `..`" constraints are checked separately.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[a-z0-9_'+\-.]*[a-z0-9_+\-]@([a-z0-9][a-z0-9\-]*\.)+[a-z]{2,}$")
        .expect("email pattern is valid")
});

/// Email syntax check used by [`StringSchema::email`]
pub fn is_valid_email(candidate: &str) -> bool {
    !candidate.starts_with('.') && !candidate.contains("..") && EMAIL_PATTERN.is_match(candidate)
}

/// A string with optional length bounds and format
#[derive(Debug, Clone, Default)]
pub struct StringSchema {
    min: Option<usize>,
    max: Option<usize>,
    email: bool,
}

impl StringSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    pub fn email(mut self) -> Self {
        self.email = true;
        self
    }
}

impl Schema for StringSchema {
    type Output = String;

    fn parse_at(
        &self,
        input: Option<&Value>,
        path: &FieldPath,
        ctx: &mut ParseContext,
    ) -> Option<String> {
        let Some(Value::String(text)) = input else {
            report_type(input, ValueKind::String, path, ctx);
            return None;
        };

        // Checks do not short-circuit each other
        let length = text.chars().count();
        let mut valid = true;
        if let Some(minimum) = self.min.filter(|minimum| length < *minimum) {
            ctx.report(path, IssueKind::TooShort { minimum });
            valid = false;
        }
        if let Some(maximum) = self.max.filter(|maximum| length > *maximum) {
            ctx.report(path, IssueKind::TooLong { maximum });
            valid = false;
        }
        if self.email && !is_valid_email(text) {
            ctx.report(path, IssueKind::InvalidEmail);
            valid = false;
        }

        valid.then(|| text.clone())
    }
}

/// Any JSON number, read as `f64`
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberSchema;

impl Schema for NumberSchema {
    type Output = f64;

    fn parse_at(&self, input: Option<&Value>, path: &FieldPath, ctx: &mut ParseContext) -> Option<f64> {
        match input.and_then(Value::as_f64) {
            Some(number) => Some(number),
            None => {
                report_type(input, ValueKind::Number, path, ctx);
                None
            }
        }
    }
}

/// See [`Schema::optional`]
#[derive(Debug, Clone)]
pub struct Optional<S>(S);

impl<S: Schema> Schema for Optional<S> {
    type Output = Option<S::Output>;

    fn parse_at(
        &self,
        input: Option<&Value>,
        path: &FieldPath,
        ctx: &mut ParseContext,
    ) -> Option<Self::Output> {
        match input {
            None => Some(None),
            Some(_) => self.0.parse_at(input, path, ctx).map(Some),
        }
    }
}

/// See [`Schema::refine`]
pub struct Refined<S, F> {
    inner: S,
    predicate: F,
    message: &'static str,
}

impl<S, F> Schema for Refined<S, F>
where
    S: Schema,
    F: Fn(&S::Output) -> bool,
{
    type Output = S::Output;

    fn parse_at(
        &self,
        input: Option<&Value>,
        path: &FieldPath,
        ctx: &mut ParseContext,
    ) -> Option<S::Output> {
        let value = self.inner.parse_at(input, path, ctx)?;
        if (self.predicate)(&value) {
            Some(value)
        } else {
            ctx.report(
                path,
                IssueKind::Custom {
                    message: self.message,
                },
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse<S: Schema>(schema: &S, input: Option<&Value>) -> (Option<S::Output>, Vec<String>) {
        let mut ctx = ParseContext::new();
        let output = schema.parse_at(input, &FieldPath::from_segments(&["field"]), &mut ctx);
        let messages = ctx.into_issues().iter().map(Issue::message).collect();
        (output, messages)
    }

    mod strings {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_missing_is_required() {
            let (output, messages) = parse(&StringSchema::new(), None);
            assert!(output.is_none());
            assert_eq!(messages, vec!["Required"]);
        }

        #[test]
        fn test_wrong_type() {
            let (_, messages) = parse(&StringSchema::new(), Some(&json!(5)));
            assert_eq!(messages, vec!["Expected string, received number"]);
        }

        #[test]
        fn test_length_counts_characters() {
            let schema = StringSchema::new().min(1).max(3);
            let (output, messages) = parse(&schema, Some(&json!("äöü")));
            assert_eq!(output.as_deref(), Some("äöü"));
            assert!(messages.is_empty());
        }

        #[test]
        fn test_all_checks_report() {
            let schema = StringSchema::new().max(3).email();
            let (output, messages) = parse(&schema, Some(&json!("not an email")));
            assert!(output.is_none());
            assert_eq!(
                messages,
                vec!["String must contain at most 3 character(s)", "Invalid email"]
            );
        }
    }

    mod emails {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_accepts_common_addresses() {
            assert!(is_valid_email("test@test.com"));
            assert!(is_valid_email("xxx@yyy.zzz"));
            assert!(is_valid_email("First.Last+tag@sub.example.org"));
            assert!(is_valid_email("o'brien@example.ie"));
        }

        #[test]
        fn test_rejects_malformed_addresses() {
            assert!(!is_valid_email(""));
            assert!(!is_valid_email("test,test@com"));
            assert!(!is_valid_email("test@com"));
            assert!(!is_valid_email(".lead@example.com"));
            assert!(!is_valid_email("double..dot@example.com"));
            assert!(!is_valid_email("trailing.@example.com"));
            assert!(!is_valid_email("a@-example.com"));
            assert!(!is_valid_email("a@example.c"));
        }
    }

    mod numbers {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_integers_and_floats() {
            assert_eq!(parse(&NumberSchema, Some(&json!(100))).0, Some(100.0));
            assert_eq!(parse(&NumberSchema, Some(&json!(2.5))).0, Some(2.5));
        }

        #[test]
        fn test_numeric_string_is_not_coerced() {
            let (output, messages) = parse(&NumberSchema, Some(&json!("100")));
            assert!(output.is_none());
            assert_eq!(messages, vec!["Expected number, received string"]);
        }
    }

    mod combinators {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_optional_accepts_absent() {
            let (output, messages) = parse(&NumberSchema.optional(), None);
            assert_eq!(output, Some(None));
            assert!(messages.is_empty());
        }

        #[test]
        fn test_optional_rejects_null() {
            let (output, messages) = parse(&NumberSchema.optional(), Some(&json!(null)));
            assert!(output.is_none());
            assert_eq!(messages, vec!["Expected number, received null"]);
        }

        #[test]
        fn test_refine_runs_after_inner_success() {
            let schema = NumberSchema.refine(|n| *n > 0.0, "Must be positive");
            assert_eq!(parse(&schema, Some(&json!(3))).0, Some(3.0));

            let (output, messages) = parse(&schema, Some(&json!(-3)));
            assert!(output.is_none());
            assert_eq!(messages, vec!["Must be positive"]);
        }

        #[test]
        fn test_refine_skipped_when_inner_fails() {
            let schema = NumberSchema.refine(|_| false, "never shown");
            let (_, messages) = parse(&schema, None);
            assert_eq!(messages, vec!["Required"]);
        }

        #[test]
        fn test_expect_object() {
            let mut ctx = ParseContext::new();
            let path = FieldPath::root();
            assert!(expect_object(Some(&json!({})), &path, &mut ctx).is_some());
            assert!(!ctx.has_issues());
            assert!(expect_object(Some(&json!([])), &path, &mut ctx).is_none());
            assert_eq!(
                ctx.into_issues()[0].message(),
                "Expected object, received array"
            );
        }
    }
}
