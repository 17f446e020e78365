//! Validation Errors
//!
//! A field → messages map collected from `validator` derives and from
//! application-level checks (uniqueness and the like). Keys use the
//! camelCase spelling of the JSON field so clients can match them directly.

use std::collections::BTreeMap;
use std::fmt;

use convert_case::{Case, Casing};
use serde::Serialize;
use validator::Validate;

/// Field name → list of messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message under `field`
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Append the display form of `error` under `field`
    pub fn add_error(&mut self, field: impl Into<String>, error: &impl fmt::Display) {
        self.add(field, error.to_string());
    }

    /// Fold every message of `other` into `self`
    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    /// True when at least one field failed
    pub fn is_fail(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, messages.join(", "))?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<validator::ValidationErrors> for ValidationErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut out = ValidationErrors::new();
        for (field, field_errors) in errors.field_errors() {
            let key = field.to_case(Case::Camel);
            for error in field_errors.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                out.add(key.clone(), message);
            }
        }
        out
    }
}

/// Run every declared rule of `value`, collecting all failures
pub fn validate<T: Validate>(value: &T) -> ValidationErrors {
    match value.validate() {
        Ok(()) => ValidationErrors::new(),
        Err(errors) => errors.into(),
    }
}
