//! Validation Engine
//!
//! Tag-balance checking, separated from tokenizing and from LSP concerns.

pub mod engine;

pub use engine::{
    validate, validate_document, validate_events, validate_with_profile, Diagnostic, Reason,
    Severity, ValidationOutcome, ValidationResult, Violation,
};
