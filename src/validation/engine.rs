//! Validation Engine
//!
//! Tag-balance checking over a tag event stream, separated from tokenizing
//! and from the LSP and form layers that report the outcome.

use std::fmt;

use crate::markup::{Position, TagEvent, Tokenizer};
use crate::profile::{Profile, ProfileRegistry};

/// Why a document failed the tag-balance check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reason {
    /// A closing tag arrived while no tag was open
    UnmatchedClose,
    /// A closing tag did not match the most recently opened tag
    MismatchedClose,
    /// Input ended with tags still open
    UnclosedTags,
}

impl Reason {
    /// Stable identifier, used as the diagnostic code
    pub fn code(&self) -> &'static str {
        match self {
            Reason::UnmatchedClose => "unmatched-close",
            Reason::MismatchedClose => "mismatched-close",
            Reason::UnclosedTags => "unclosed-tags",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The first structural fault found in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub reason: Reason,
    pub detail: String,
    /// `None` for faults detected at end of input
    pub position: Option<Position>,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(position) => write!(f, "{} ({})", self.detail, position),
            None => f.write_str(&self.detail),
        }
    }
}

impl std::error::Error for Violation {}

/// Result of a tag-balance check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Invalid(Violation),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }

    pub fn violation(&self) -> Option<&Violation> {
        match self {
            ValidationOutcome::Valid => None,
            ValidationOutcome::Invalid(violation) => Some(violation),
        }
    }

    pub fn into_result(self) -> Result<(), Violation> {
        match self {
            ValidationOutcome::Valid => Ok(()),
            ValidationOutcome::Invalid(violation) => Err(violation),
        }
    }

    fn invalid(reason: Reason, detail: String, position: Option<Position>) -> Self {
        ValidationOutcome::Invalid(Violation {
            reason,
            detail,
            position,
        })
    }
}

/// Names of currently open tags, most recent last
#[derive(Debug, Default)]
struct TagStack {
    names: Vec<String>,
}

impl TagStack {
    fn push(&mut self, name: String) {
        self.names.push(name);
    }

    fn pop(&mut self) -> Option<String> {
        self.names.pop()
    }

    fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Open tags in the order they were opened
    fn open_order(&self) -> String {
        self.names.join(", ")
    }
}

/// Check a stream of tag events for balance.
///
/// Consumes the stream once and stops at the first fault.
pub fn validate_events<I>(events: I) -> ValidationOutcome
where
    I: IntoIterator<Item = TagEvent>,
{
    let mut stack = TagStack::default();

    for event in events {
        match event {
            TagEvent::Open { name, .. } => stack.push(name),
            TagEvent::Close { name, position } => {
                let Some(expected) = stack.pop() else {
                    return ValidationOutcome::invalid(
                        Reason::UnmatchedClose,
                        "closing tag encountered before any matching opening tag".to_string(),
                        Some(position),
                    );
                };
                if expected != name {
                    return ValidationOutcome::invalid(
                        Reason::MismatchedClose,
                        format!("expected closing tag for '{}', got '{}'", expected, name),
                        Some(position),
                    );
                }
            }
        }
    }

    if stack.is_empty() {
        ValidationOutcome::Valid
    } else {
        ValidationOutcome::invalid(
            Reason::UnclosedTags,
            format!(
                "one or more tags were never closed: {}",
                stack.open_order()
            ),
            None,
        )
    }
}

/// Check markup for tag balance under the default `strict` profile
pub fn validate(markup: &str) -> ValidationOutcome {
    validate_with_profile(markup, &Profile::strict())
}

/// Check markup for tag balance under a specific profile
pub fn validate_with_profile(markup: &str, profile: &Profile) -> ValidationOutcome {
    validate_events(Tokenizer::new(markup, profile))
}

/// Severity of a diagnostic message
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Severity {
    Error,
    Warning,
}

/// A diagnostic message for a validation issue
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// `None` when the issue belongs to the end of the document
    pub position: Option<Position>,
    pub message: String,
    pub severity: Severity,
    pub code: Option<&'static str>,
}

impl From<&Violation> for Diagnostic {
    fn from(violation: &Violation) -> Self {
        Self {
            position: violation.position,
            message: violation.detail.clone(),
            severity: Severity::Error,
            code: Some(violation.reason.code()),
        }
    }
}

/// Result of checking a whole document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationResult {
    pub profile: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_violation(&mut self, violation: &Violation) {
        self.diagnostics.push(Diagnostic::from(violation));
    }

    pub fn add_warning(&mut self, position: Option<Position>, message: String) {
        self.diagnostics.push(Diagnostic {
            position,
            message,
            severity: Severity::Warning,
            code: None,
        });
    }

    pub fn is_valid(&self) -> bool {
        !self
            .diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }
}

/// Validate an entire document, honouring a `tagbalance-profile` modeline.
///
/// An unknown modeline profile is reported as a warning and the registry's
/// active profile is used instead.
pub fn validate_document(content: &str, registry: &ProfileRegistry) -> ValidationResult {
    let mut result = ValidationResult::new();

    let mut profile = registry.get_active_profile();

    if let Some((line, name)) = registry.detect_modeline(content) {
        match registry.get_profile(&name) {
            Some(found) => profile = Some(found),
            None => result.add_warning(
                Some(Position::new(line, 1)),
                format!("Unknown profile '{}'", name),
            ),
        }
    }

    let fallback = Profile::strict();
    let profile = profile.unwrap_or(&fallback);
    result.profile = Some(profile.name.clone());

    if let ValidationOutcome::Invalid(violation) = validate_with_profile(content, profile) {
        result.add_violation(&violation);
    }

    result
}
