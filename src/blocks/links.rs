//! Link fields
//!
//! A link value offers three mutually exclusive targets. Which combinations
//! are accepted depends on whether the link carries display text.

use serde::{Deserialize, Serialize};

use crate::blocks::fields::{is_blank, Clean, FieldErrors};
use crate::profile::Profile;

pub const INTERNAL_LINK: &str = "internal_link";
pub const DOCUMENT_LINK: &str = "document_link";
pub const EXTERNAL_LINK: &str = "external_link";
pub const DISPLAY_TEXT: &str = "display_text";

/// Every field that can hold a link target
pub const LINK_FIELDS: [&str; 3] = [INTERNAL_LINK, DOCUMENT_LINK, EXTERNAL_LINK];

pub const ONLY_ONE_LINK: &str = "Only one link type may be specified.";
pub const ONE_LINK_REQUIRED: &str = "One link type must be provided.";
pub const EXACTLY_ONE_LINK: &str = "Must provide exactly one link type";
pub const DISPLAY_TEXT_REQUIRED: &str = "Display text is required if using an external link";

pub const LINK_SUMMARY: &str = "Link block validation error";

/// Link targets: page id, document id or URL
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LinkValue {
    pub internal_link: Option<u64>,
    pub document_link: Option<u64>,
    pub external_link: Option<String>,
    pub display_text: Option<String>,
}

impl LinkValue {
    /// Link fields holding a value, in declaration order
    pub fn present_links(&self) -> Vec<&'static str> {
        let mut present = Vec::new();
        if self.internal_link.is_some() {
            present.push(INTERNAL_LINK);
        }
        if self.document_link.is_some() {
            present.push(DOCUMENT_LINK);
        }
        if !is_blank(self.external_link.as_deref()) {
            present.push(EXTERNAL_LINK);
        }
        present
    }

    fn has_display_text(&self) -> bool {
        !is_blank(self.display_text.as_deref())
    }
}

/// Link with optional display text.
///
/// A link target is needed when display text is given or the block is
/// required; otherwise the whole value may be left empty.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct LinkBlock {
    #[serde(flatten)]
    pub link: LinkValue,
    #[serde(skip)]
    pub required: bool,
}

impl LinkBlock {
    pub fn new(link: LinkValue, required: bool) -> Self {
        Self { link, required }
    }
}

impl Clean for LinkBlock {
    fn summary(&self) -> &'static str {
        LINK_SUMMARY
    }

    fn clean(&self, _profile: &Profile) -> FieldErrors {
        clean_link(&self.link, self.required)
    }
}

/// Link that must point at exactly one target and has no text of its own
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct LinkWithoutText {
    #[serde(flatten)]
    pub link: LinkValue,
}

impl Clean for LinkWithoutText {
    fn summary(&self) -> &'static str {
        LINK_SUMMARY
    }

    fn clean(&self, _profile: &Profile) -> FieldErrors {
        clean_link_without_text(&self.link)
    }
}

/// Validate a link that may carry display text
pub fn clean_link(value: &LinkValue, required: bool) -> FieldErrors {
    let mut errors = FieldErrors::new();

    let present = value.present_links();
    let has_display_text = value.has_display_text();
    let min_links = if has_display_text || required { 1 } else { 0 };

    if present.len() > 1 {
        for field in &present {
            errors.add(*field, ONLY_ONE_LINK);
        }
    } else if present.len() < min_links {
        for field in LINK_FIELDS {
            errors.add(field, ONE_LINK_REQUIRED);
        }
    }

    if !is_blank(value.external_link.as_deref()) && !has_display_text {
        errors.add(DISPLAY_TEXT, DISPLAY_TEXT_REQUIRED);
    }

    errors
}

/// Validate a link that must have exactly one target
pub fn clean_link_without_text(value: &LinkValue) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if value.present_links().len() != 1 {
        for field in LINK_FIELDS {
            errors.add(field, EXACTLY_ONE_LINK);
        }
    }

    errors
}
