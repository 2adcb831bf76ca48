//! Validation helpers shared by request DTOs.
//!
//! DTOs derive [`validator::Validate`]; this module holds the regexes and
//! custom rules they reference, and folds `validator`'s nested error map into
//! the flat `errors[]` list carried by the response envelope.

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::shared::constants::PASSWORD_SPECIAL_CHARS;
use crate::shared::messages;

lazy_static! {
    /// At least one ASCII uppercase letter
    pub static ref UPPERCASE_REGEX: Regex = Regex::new(r"[A-Z]").unwrap();

    /// At least one ASCII lowercase letter
    pub static ref LOWERCASE_REGEX: Regex = Regex::new(r"[a-z]").unwrap();

    /// At least one ASCII digit
    pub static ref DIGIT_REGEX: Regex = Regex::new(r"[0-9]").unwrap();
}

fn rule_error(code: &'static str, message: &'static str) -> validator::ValidationError {
    validator::ValidationError::new(code).with_message(Cow::Borrowed(message))
}

pub fn has_uppercase(value: &str) -> Result<(), validator::ValidationError> {
    if UPPERCASE_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(rule_error("uppercase", messages::PASSWORD_UPPERCASE))
    }
}

pub fn has_lowercase(value: &str) -> Result<(), validator::ValidationError> {
    if LOWERCASE_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(rule_error("lowercase", messages::PASSWORD_LOWERCASE))
    }
}

pub fn has_digit(value: &str) -> Result<(), validator::ValidationError> {
    if DIGIT_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(rule_error("digit", messages::PASSWORD_DIGIT))
    }
}

pub fn has_special_char(value: &str) -> Result<(), validator::ValidationError> {
    if value.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c)) {
        Ok(())
    } else {
        Err(rule_error("special_char", messages::PASSWORD_SPECIAL))
    }
}

/// Deserialize an optional string, treating `""` as absent so `required`
/// reports a blank value as missing.
pub fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

/// A single violated rule on a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    /// Wire name of the offending field (nested fields use dot notation)
    pub field: String,
    /// Localized, human-readable reason
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Outcome of a failed validation: one entry per violated field rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("validation failed: {}", summary(.errors))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

fn summary(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError::new(field, message)],
        }
    }

    /// Messages reported against `field`, in rule order
    pub fn messages_for(&self, field: &str) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.message.as_str())
            .collect()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

impl From<ValidationErrors> for ValidationError {
    fn from(errors: ValidationErrors) -> Self {
        let mut flat = Vec::new();
        flatten(None, &errors, &mut flat);
        Self { errors: flat }
    }
}

/// `snake_case` struct field to the camelCase name used on the wire
fn wire_name(field: &str) -> String {
    let mut name = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            name.extend(c.to_uppercase());
            upper = false;
        } else {
            name.push(c);
        }
    }
    name
}

// Fields are emitted in name order so the envelope's leading message is stable.
fn flatten(prefix: Option<&str>, errors: &ValidationErrors, out: &mut Vec<FieldError>) {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    for (field, kind) in fields {
        let name = match prefix {
            Some(prefix) => format!("{}.{}", prefix, wire_name(field)),
            None => wire_name(field),
        };

        match kind {
            ValidationErrorsKind::Field(errs) => {
                out.extend(errs.iter().map(|e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    FieldError::new(name.clone(), message)
                }));
            }
            ValidationErrorsKind::Struct(inner) => flatten(Some(&name), inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    flatten(Some(&format!("{}[{}]", name, index)), inner, out);
                }
            }
        }
    }
}
