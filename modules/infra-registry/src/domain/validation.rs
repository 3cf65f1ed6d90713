//! Field-level input validation.
//!
//! Checks are pure: they never consult storage. A [`Validator`] collects every
//! violation of a request instead of stopping at the first one, so callers get
//! the complete list in a single response.

use std::fmt;

use thiserror::Error;

use super::patch::FieldPatch;
use super::resource::Categorical;

/// Machine-readable rule identifier attached to each violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationCode {
    Required,
    NotNullable,
    TooShort,
    TooLong,
    NotPositive,
    InvalidChoice,
    OutOfRange,
}

impl ViolationCode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::NotNullable => "not_nullable",
            Self::TooShort => "too_short",
            Self::TooLong => "too_long",
            Self::NotPositive => "not_positive",
            Self::InvalidChoice => "invalid_choice",
            Self::OutOfRange => "out_of_range",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub code: ViolationCode,
    pub message: String,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every rule a request broke, in field order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid input: {}", render(.violations))]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

fn render(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    #[must_use]
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Violations reported against `field`.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldViolation> {
        self.violations.iter().filter(move |v| v.field == field)
    }

    #[must_use]
    pub fn has(&self, field: &str, code: ViolationCode) -> bool {
        self.for_field(field).any(|v| v.code == code)
    }
}

#[derive(Debug, Default)]
pub struct Validator {
    violations: Vec<FieldViolation>,
}

impl Validator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reject(&mut self, field: &'static str, code: ViolationCode, message: impl Into<String>) {
        self.violations.push(FieldViolation {
            field,
            code,
            message: message.into(),
        });
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    #[must_use]
    pub fn into_errors(self) -> ValidationErrors {
        ValidationErrors {
            violations: self.violations,
        }
    }

    /// # Errors
    /// Returns the collected violations when at least one rule was broken.
    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.is_clean() {
            Ok(())
        } else {
            Err(self.into_errors())
        }
    }

    // ---- creation rules -------------------------------------------------

    pub fn required<T>(&mut self, field: &'static str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.reject(field, ViolationCode::Required, "field is required");
        }
        value
    }

    /// Required text of 1..=`max` characters.
    pub fn required_text(
        &mut self,
        field: &'static str,
        value: Option<String>,
        max: usize,
    ) -> Option<String> {
        let value = self.required(field, value)?;
        self.text(field, &value, 1, max).then_some(value)
    }

    /// Optional text of at most `max` characters.
    pub fn optional_text(&mut self, field: &'static str, value: Option<&str>, max: usize) {
        if let Some(value) = value {
            self.text(field, value, 0, max);
        }
    }

    /// Required number strictly greater than zero.
    pub fn required_positive(&mut self, field: &'static str, value: Option<f64>) -> Option<f64> {
        let value = self.required(field, value)?;
        self.positive(field, value).then_some(value)
    }

    pub fn required_category<C: Categorical>(
        &mut self,
        field: &'static str,
        raw: Option<String>,
    ) -> Option<C> {
        let raw = self.required(field, raw)?;
        self.category(field, &raw)
    }

    /// Category filter taken from a query string; absent means "no filter".
    pub fn optional_category<C: Categorical>(
        &mut self,
        field: &'static str,
        raw: Option<&str>,
    ) -> Option<C> {
        raw.and_then(|raw| self.category(field, raw))
    }

    // ---- partial-update rules -------------------------------------------

    /// A non-nullable field may be left out of an update but not set to null.
    pub fn patch_required<T>(&mut self, field: &'static str, patch: FieldPatch<T>) -> Option<T> {
        match patch {
            FieldPatch::Unchanged => None,
            FieldPatch::Clear => {
                self.reject(field, ViolationCode::NotNullable, "field cannot be null");
                None
            }
            FieldPatch::Set(value) => Some(value),
        }
    }

    pub fn patch_text(
        &mut self,
        field: &'static str,
        patch: FieldPatch<String>,
        max: usize,
    ) -> Option<String> {
        let value = self.patch_required(field, patch)?;
        self.text(field, &value, 1, max).then_some(value)
    }

    pub fn patch_positive(&mut self, field: &'static str, patch: FieldPatch<f64>) -> Option<f64> {
        let value = self.patch_required(field, patch)?;
        self.positive(field, value).then_some(value)
    }

    pub fn patch_category<C: Categorical>(
        &mut self,
        field: &'static str,
        patch: FieldPatch<String>,
    ) -> Option<C> {
        let raw = self.patch_required(field, patch)?;
        self.category(field, &raw)
    }

    /// Nullable text: null clears it, a value must respect `max`.
    pub fn patch_optional_text(&mut self, field: &'static str, patch: &FieldPatch<String>, max: usize) {
        self.optional_text(field, patch.as_set().map(String::as_str), max);
    }

    // ---- primitive checks -----------------------------------------------

    fn text(&mut self, field: &'static str, value: &str, min: usize, max: usize) -> bool {
        let len = value.chars().count();
        if len < min {
            let message = if min == 1 {
                "must not be empty".to_owned()
            } else {
                format!("must be at least {min} characters")
            };
            self.reject(field, ViolationCode::TooShort, message);
            return false;
        }
        if len > max {
            self.reject(
                field,
                ViolationCode::TooLong,
                format!("must be at most {max} characters"),
            );
            return false;
        }
        true
    }

    fn positive(&mut self, field: &'static str, value: f64) -> bool {
        // NaN fails the comparison as well
        if value > 0.0 {
            true
        } else {
            self.reject(field, ViolationCode::NotPositive, "must be greater than 0");
            false
        }
    }

    fn category<C: Categorical>(&mut self, field: &'static str, raw: &str) -> Option<C> {
        let parsed = C::parse(raw);
        if parsed.is_none() {
            let allowed = C::ALL
                .iter()
                .map(|c| c.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            self.reject(
                field,
                ViolationCode::InvalidChoice,
                format!("must be one of: {allowed}"),
            );
        }
        parsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bridge::BridgeCondition;

    #[test]
    fn required_text_reports_missing_empty_and_long_values() {
        let mut v = Validator::new();
        assert_eq!(v.required_text("a", None, 5), None);
        assert_eq!(v.required_text("b", Some(String::new()), 5), None);
        assert_eq!(v.required_text("c", Some("abcdef".to_owned()), 5), None);
        assert_eq!(
            v.required_text("d", Some("abc".to_owned()), 5).as_deref(),
            Some("abc")
        );

        let errors = v.into_errors();
        assert_eq!(errors.violations().len(), 3);
        assert!(errors.has("a", ViolationCode::Required));
        assert!(errors.has("b", ViolationCode::TooShort));
        assert!(errors.has("c", ViolationCode::TooLong));
        assert_eq!(errors.for_field("d").count(), 0);
    }

    #[test]
    fn text_length_counts_characters_not_bytes() {
        let mut v = Validator::new();
        // four characters, eight bytes
        v.optional_text("year_built", Some("\u{c4}\u{d6}\u{dc}\u{df}"), 4);
        assert!(v.is_clean());
    }

    #[test]
    fn positive_rejects_zero_and_negative() {
        let mut v = Validator::new();
        assert_eq!(v.required_positive("x", Some(0.0)), None);
        assert_eq!(v.required_positive("y", Some(-1.5)), None);
        assert_eq!(v.required_positive("z", Some(0.1)), Some(0.1));
        let errors = v.into_errors();
        assert!(errors.has("x", ViolationCode::NotPositive));
        assert!(errors.has("y", ViolationCode::NotPositive));
    }

    #[test]
    fn category_lists_allowed_values() {
        let mut v = Validator::new();
        let parsed: Option<BridgeCondition> = v.required_category("condition", Some("meh".to_owned()));
        assert_eq!(parsed, None);
        let errors = v.into_errors();
        let violation = errors.for_field("condition").next().unwrap();
        assert_eq!(violation.code, ViolationCode::InvalidChoice);
        assert_eq!(
            violation.message,
            "must be one of: excellent, good, fair, poor, critical"
        );
    }

    #[test]
    fn patch_required_rejects_null_but_allows_absence() {
        let mut v = Validator::new();
        assert_eq!(v.patch_required::<f64>("a", FieldPatch::Unchanged), None);
        assert_eq!(v.patch_required::<f64>("b", FieldPatch::Clear), None);
        assert_eq!(v.patch_required("c", FieldPatch::Set(2.0)), Some(2.0));
        let errors = v.into_errors();
        assert_eq!(errors.violations().len(), 1);
        assert!(errors.has("b", ViolationCode::NotNullable));
    }

    #[test]
    fn finish_is_ok_without_violations() {
        assert!(Validator::new().finish().is_ok());
    }

    #[test]
    fn display_joins_violations() {
        let mut v = Validator::new();
        v.required::<String>("name", None);
        v.required::<String>("location", None);
        assert_eq!(
            v.into_errors().to_string(),
            "invalid input: name: field is required; location: field is required"
        );
    }
}
