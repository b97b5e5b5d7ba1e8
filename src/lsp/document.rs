use crate::profile::ProfileRegistry;
use crate::validation::{validate_document, ValidationResult};

/// State for each open document
#[derive(Debug)]
pub struct DocumentState {
    pub content: String,
    /// Result of checking `content`, including the profile it was checked with
    pub validation: ValidationResult,
}

impl DocumentState {
    /// Check `content` once; diagnostics are published from the stored result
    pub fn new(content: String, registry: &ProfileRegistry) -> Self {
        let validation = validate_document(&content, registry);
        Self {
            content,
            validation,
        }
    }
}
