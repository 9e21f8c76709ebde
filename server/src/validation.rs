//! Input rules for todo names.
//!
//! # Design
//! Rules are plain functions run in a fixed order; each failure is recorded
//! against a field name and every failure is collected before reporting, so
//! a caller sees all problems with a name at once. `required` runs first and
//! short-circuits: the value rules below only see a present string.
//!
//! The length bound is checked on the raw input and the blank check on the
//! trimmed input. Both apply: an empty string fails both, while a run of
//! spaces inside the bound fails only the blank check.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use todo_store::MAX_NAME_CHARS;

pub const NAME_FIELD: &str = "name";

/// Key for a path id that is not an integer.
pub const ID_FIELD: &str = "id";

/// Placeholder key for failures not tied to a single field.
pub const REQUEST_FIELD: &str = "request";

pub const NAME_REQUIRED: &str = "The name field is required.";
pub const NAME_LENGTH: &str =
    "The field name must be a string with a minimum length of 1 and a maximum length of 200.";
pub const NAME_BLANK: &str = "Name cannot be empty or whitespace.";

const MIN_NAME_CHARS: usize = 1;

type Rule = fn(&str) -> Option<&'static str>;

const NAME_RULES: [Rule; 2] = [length_within_bounds, not_blank];

fn length_within_bounds(value: &str) -> Option<&'static str> {
    let len = value.chars().count();
    (!(MIN_NAME_CHARS..=MAX_NAME_CHARS).contains(&len)).then_some(NAME_LENGTH)
}

fn not_blank(value: &str) -> Option<&'static str> {
    value.trim().is_empty().then_some(NAME_BLANK)
}

/// Validate a requested name and return it trimmed.
pub fn validate_name(name: Option<&str>) -> Result<String, ValidationErrors> {
    let Some(value) = name else {
        return Err(ValidationErrors::single(NAME_FIELD, NAME_REQUIRED));
    };

    let mut errors = ValidationErrors::new();
    for rule in NAME_RULES {
        if let Some(message) = rule(value) {
            errors.add(NAME_FIELD, message);
        }
    }
    errors.into_result(value.trim().to_string())
}

/// Validation failures grouped by field, in rule order within a field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `Ok(value)` when nothing was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<_> = self.fields().collect();
        write!(f, "invalid {}", fields.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}
