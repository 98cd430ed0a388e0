//! Field-level command validation.
//!
//! Commands call these checks explicitly at the top of their handler. Every failing
//! field is collected, so a single `ConstraintViolation` enumerates all of them.

use std::sync::OnceLock;

use regex_lite::Regex;
use serde::Serialize;

use crate::error::{DomainError, DomainResult};

/// One failed constraint on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl core::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Collector for field violations.
///
/// ```ignore
/// let mut v = Violations::new();
/// v.not_blank("name", &cmd.name)
///     .required("rating", &cmd.rating);
/// v.finish()?;
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Violations {
    items: Vec<FieldViolation>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation unconditionally.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) -> &mut Self {
        self.items.push(FieldViolation::new(field, message));
        self
    }

    /// Record `message` when `ok` is false.
    pub fn check(&mut self, field: &str, ok: bool, message: &str) -> &mut Self {
        if !ok {
            self.push(field, message);
        }
        self
    }

    /// The value must contain at least one non-whitespace character.
    pub fn not_blank(&mut self, field: &str, value: &str) -> &mut Self {
        self.check(field, !value.trim().is_empty(), "must not be blank")
    }

    /// The optional value must be present.
    pub fn required<T>(&mut self, field: &str, value: &Option<T>) -> &mut Self {
        self.check(field, value.is_some(), "must not be null")
    }

    /// The value must lie in `min..=max`.
    pub fn range<T>(&mut self, field: &str, value: T, min: T, max: T) -> &mut Self
    where
        T: PartialOrd + core::fmt::Display,
    {
        if value < min || value > max {
            self.push(field, format!("must be between {min} and {max}"));
        }
        self
    }

    /// The character count must lie in `min..=max`.
    pub fn length(&mut self, field: &str, value: &str, min: usize, max: usize) -> &mut Self {
        let len = value.chars().count();
        if len < min || len > max {
            self.push(field, format!("size must be between {min} and {max}"));
        }
        self
    }

    /// The value must look like an e-mail address.
    pub fn email(&mut self, field: &str, value: &str) -> &mut Self {
        let well_formed = email_pattern().is_some_and(|re| re.is_match(value));
        self.check(field, well_formed, "must be a well-formed email address")
    }

    /// The value must not contain whitespace.
    pub fn no_whitespace(&mut self, field: &str, value: &str) -> &mut Self {
        self.check(
            field,
            !value.chars().any(char::is_whitespace),
            "must not contain whitespace",
        )
    }

    /// Merge violations reported by a nested validator under `prefix`.
    pub fn nested(&mut self, prefix: &str, other: Violations) -> &mut Self {
        for v in other.items {
            self.push(format!("{prefix}.{}", v.field), v.message);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<FieldViolation> {
        self.items
    }

    /// `Ok(())` when nothing failed, otherwise a `ConstraintViolation` listing every field.
    pub fn finish(self) -> DomainResult<()> {
        if self.items.is_empty() {
            Ok(())
        } else {
            Err(DomainError::ConstraintViolation(self.items))
        }
    }
}

fn email_pattern() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$").ok())
        .as_ref()
}
