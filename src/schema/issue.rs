//! Validation issues and the paths they are bound to

use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Address of a leaf or subtree in the form, e.g. `price.amount.min`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FieldPath(Vec<&'static str>);

impl FieldPath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Build a path from its segments
    pub fn from_segments(segments: &[&'static str]) -> Self {
        Self(segments.to_vec())
    }

    pub fn child(&self, segment: &'static str) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        Self(segments)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// True when `prefix` addresses this path or one of its ancestors
    pub fn starts_with(&self, prefix: &FieldPath) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// JSON value kinds, as named in type-mismatch messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Number,
    Boolean,
    Null,
    Array,
    Object,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Null => "null",
            Self::Array => "array",
            Self::Object => "object",
        };
        f.write_str(name)
    }
}

/// What went wrong at a path. `Display` is the user-facing message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IssueKind {
    #[error("Required")]
    Required { expected: ValueKind },

    #[error("Expected {expected}, received {received}")]
    InvalidType {
        expected: ValueKind,
        received: ValueKind,
    },

    #[error("String must contain at least {minimum} character(s)")]
    TooShort { minimum: usize },

    #[error("String must contain at most {maximum} character(s)")]
    TooLong { maximum: usize },

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Invalid discriminator value. Expected {}", quoted_options(.options))]
    InvalidDiscriminator { options: Vec<&'static str> },

    #[error("{message}")]
    Custom { message: &'static str },
}

fn quoted_options(options: &[&'static str]) -> String {
    options
        .iter()
        .map(|option| format!("'{option}'"))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// A single failed rule
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub path: FieldPath,
    pub kind: IssueKind,
}

impl Issue {
    pub fn new(path: FieldPath, kind: IssueKind) -> Self {
        Self { path, kind }
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.path, self.kind)
        }
    }
}

fn summarize(issues: &[Issue]) -> String {
    match issues.first() {
        Some(first) => format!("form is invalid ({} issue(s)); first: {first}", issues.len()),
        None => "form is invalid".to_string(),
    }
}

/// Ordered issues from one failed parse. Never empty.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}", summarize(.issues))]
pub struct ValidationErrors {
    issues: Vec<Issue>,
}

impl ValidationErrors {
    /// Wrap a non-empty issue list; `None` when there is nothing to report
    pub fn from_issues(issues: Vec<Issue>) -> Option<Self> {
        if issues.is_empty() {
            None
        } else {
            Some(Self { issues })
        }
    }

    pub fn single(issue: Issue) -> Self {
        Self {
            issues: vec![issue],
        }
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    #[cfg(test)]
    pub fn first(&self) -> &Issue {
        &self.issues[0]
    }

    /// Messages reported at exactly `path`, in order
    #[cfg(test)]
    pub fn messages_at(&self, path: &FieldPath) -> Vec<String> {
        self.issues
            .iter()
            .filter(|issue| &issue.path == path)
            .map(Issue::message)
            .collect()
    }
}
