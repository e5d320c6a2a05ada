//! Per-path error messages shown next to inputs

use crate::schema::{FieldPath, ValidationErrors};
use std::collections::BTreeMap;

/// First message per field path
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    messages: BTreeMap<FieldPath, String>,
}

impl FieldErrors {
    /// Build the map from a failed parse, keeping the first issue per path
    pub fn from_validation(errors: &ValidationErrors) -> Self {
        let mut messages = BTreeMap::new();
        for issue in errors.issues() {
            messages
                .entry(issue.path.clone())
                .or_insert_with(|| issue.message());
        }
        Self { messages }
    }

    pub fn get(&self, path: &FieldPath) -> Option<&str> {
        self.messages.get(path).map(String::as_str)
    }

    #[cfg(test)]
    pub fn insert(&mut self, path: FieldPath, message: impl Into<String>) {
        self.messages.insert(path, message.into());
    }

    /// Remove every message at `prefix` or below it
    pub fn clear_under(&mut self, prefix: &FieldPath) {
        self.messages.retain(|path, _| !path.starts_with(prefix));
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &str)> {
        self.messages.iter().map(|(path, message)| (path, message.as_str()))
    }
}
