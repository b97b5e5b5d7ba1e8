//! Field Errors
//!
//! Per-field error lists, the shape a form layer attaches to its inputs.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::profile::Profile;

/// Error messages keyed by field path (`links.1.external_link`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Merge errors from a child value under `prefix`
    pub fn extend_nested(&mut self, prefix: &str, nested: FieldErrors) {
        for (field, messages) in nested.errors {
            let path = format!("{}.{}", prefix, field);
            self.errors.entry(path).or_default().extend(messages);
        }
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.errors.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Field paths with errors, sorted
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.errors
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.errors {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// A block value that can check its own fields
pub trait Clean {
    /// Summary reported alongside the field errors
    fn summary(&self) -> &'static str {
        "Validation error in block"
    }

    fn clean(&self, profile: &Profile) -> FieldErrors;
}

pub(crate) const REQUIRED: &str = "This field is required.";

pub(crate) fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

pub(crate) fn require(errors: &mut FieldErrors, field: &str, value: Option<&str>) {
    if is_blank(value) {
        errors.add(field, REQUIRED);
    }
}

pub(crate) fn require_id(errors: &mut FieldErrors, field: &str, value: Option<u64>) {
    if value.is_none() {
        errors.add(field, REQUIRED);
    }
}

pub(crate) fn max_length(errors: &mut FieldErrors, field: &str, value: Option<&str>, max: usize) {
    let Some(value) = value else {
        return;
    };
    let length = value.chars().count();
    if length > max {
        errors.add(
            field,
            format!(
                "Ensure this value has at most {} characters (it has {}).",
                max, length
            ),
        );
    }
}
