//! Raw HTML fields
//!
//! Editors paste arbitrary HTML into these fields; the only check possible
//! on it is that its tags are balanced.

use crate::blocks::fields::FieldErrors;
use crate::profile::Profile;
use crate::validation::{validate_with_profile, ValidationOutcome};

/// Summary used when a block's raw HTML fails the tag-balance check
pub const CODE_SUMMARY: &str = "Code validation error";

/// Check one raw HTML field, attaching any violation to `field`.
///
/// Blank values are accepted; whether the field is required is the
/// caller's decision.
pub fn clean_html_field(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&str>,
    profile: &Profile,
) {
    let Some(markup) = value else {
        return;
    };

    if let ValidationOutcome::Invalid(violation) = validate_with_profile(markup, profile) {
        log::debug!("HTML field '{}' rejected: {}", field, violation);
        errors.add(field, violation.to_string());
    }
}
