//! Field validation and sanitization for submitted forms.
//!
//! A [`Validator`] collects errors for one submission. Each field is run
//! through a chain of rules started with [`Validator::field`]:
//!
//! ```
//! use locallibrary::validation::Validator;
//!
//! let mut v = Validator::new();
//! let name = v
//!     .field("name", Some("  Fantasy "))
//!     .trim()
//!     .length(Some(3), None, "Genre name must contain at least 3 characters")
//!     .escape()
//!     .value();
//! assert_eq!(name, "Fantasy");
//! assert!(!v.has_errors());
//! ```
//!
//! Only the first failing check of a field records a message. Sanitizers
//! (`trim`, `escape`) keep running after a failure so the value shown back to
//! the user is always the sanitized one.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use uuid::Uuid;
use validator::ValidateLength;

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Sanitized draft plus every error found in a rejected submission
#[derive(Debug, Clone)]
pub struct Invalid<D> {
    pub draft: D,
    pub errors: Vec<FieldError>,
}

/// Collects field errors for one form submission
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a rule chain for `name` over its raw submitted value
    pub fn field<'v>(&'v mut self, name: &'static str, raw: Option<&str>) -> FieldRules<'v> {
        FieldRules {
            validator: self,
            name,
            value: raw.unwrap_or_default().to_string(),
            skipped: false,
            failed: false,
        }
    }

    /// Run the same rule chain over every element of a multi-valued field
    pub fn each<T, F>(&mut self, name: &'static str, raws: &[String], rules: F) -> Vec<T>
    where
        F: Fn(FieldRules<'_>) -> T,
    {
        raws.iter()
            .map(|raw| rules(self.field(name, Some(raw))))
            .collect()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }

    /// `Ok(data)` when nothing failed, otherwise the draft and the error list
    pub fn finish<T, D>(self, data: Option<T>, draft: D) -> Result<T, Invalid<D>> {
        match data {
            Some(data) if self.errors.is_empty() => Ok(data),
            _ => Err(Invalid {
                draft,
                errors: self.errors,
            }),
        }
    }
}

/// Rule chain for a single field value
pub struct FieldRules<'v> {
    validator: &'v mut Validator,
    name: &'static str,
    value: String,
    skipped: bool,
    failed: bool,
}

impl<'v> FieldRules<'v> {
    fn fail(&mut self, message: &str) {
        self.failed = true;
        self.validator.errors.push(FieldError {
            field: self.name.to_string(),
            message: message.to_string(),
        });
    }

    fn check(mut self, ok: impl FnOnce(&String) -> bool, message: &str) -> Self {
        if !self.skipped && !self.failed && !ok(&self.value) {
            self.fail(message);
        }
        self
    }

    /// Strip leading and trailing whitespace
    pub fn trim(mut self) -> Self {
        if !self.skipped {
            let trimmed = self.value.trim();
            if trimmed.len() != self.value.len() {
                self.value = trimmed.to_string();
            }
        }
        self
    }

    /// Skip the remaining rules when the value is absent or empty
    pub fn optional(mut self) -> Self {
        if self.value.is_empty() {
            self.skipped = true;
        }
        self
    }

    pub fn not_empty(self, message: &str) -> Self {
        self.check(|v| !v.is_empty(), message)
    }

    /// Character count must fall within the given bounds
    pub fn length(self, min: Option<u64>, max: Option<u64>, message: &str) -> Self {
        self.check(|v| v.validate_length(min, max, None), message)
    }

    pub fn alphanumeric(self, message: &str) -> Self {
        self.check(
            |v| !v.is_empty() && v.chars().all(|c| c.is_ascii_alphanumeric()),
            message,
        )
    }

    /// Replace markup-significant characters with HTML entities
    pub fn escape(mut self) -> Self {
        if !self.skipped {
            self.value = escape_html(&self.value);
        }
        self
    }

    /// Sanitized value; empty when the field was skipped as optional
    pub fn value(self) -> String {
        if self.skipped {
            String::new()
        } else {
            self.value
        }
    }

    /// Parse as an ISO-8601 calendar date
    pub fn date(self, message: &str) -> Option<NaiveDate> {
        self.parse_with(parse_iso_date, message)
    }

    /// Parse as an entity identifier
    pub fn uuid(self, message: &str) -> Option<Uuid> {
        self.parse_with(|v| Uuid::parse_str(v).ok(), message)
    }

    pub fn parse<T: FromStr>(self, message: &str) -> Option<T> {
        self.parse_with(|v| v.parse().ok(), message)
    }

    fn parse_with<T>(mut self, parse: impl FnOnce(&str) -> Option<T>, message: &str) -> Option<T> {
        if self.skipped || self.failed {
            return None;
        }
        let parsed = parse(&self.value);
        if parsed.is_none() {
            self.fail(message);
        }
        parsed
    }
}

/// Escape `& < > " ' / \` and backtick for safe interpolation into HTML
pub fn escape_html(input: &str) -> String {
    html_escape::encode_safe(input)
        .replace('\\', "&#x5C;")
        .replace('`', "&#96;")
}

/// Accepts `YYYY-MM-DD` or a full ISO-8601 date-time, keeping the date part
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.date())
}
