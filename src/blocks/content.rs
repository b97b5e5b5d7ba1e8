//! Content blocks
//!
//! Field checks for each block type an editor can place in a page body.

use serde::{Deserialize, Serialize};

use crate::blocks::fields::{max_length, require, require_id, Clean, FieldErrors};
use crate::blocks::html::{clean_html_field, CODE_SUMMARY};
use crate::blocks::links::{clean_link, LinkValue, LinkWithoutText, LINK_SUMMARY};
use crate::blocks::stream::{BlockKind, StreamChild};
use crate::profile::Profile;

/// Height-to-width ratio used when an embed does not set one (9/16)
pub const LETTERBOX_RATIO: f64 = 9.0 / 16.0;
pub const MIN_ASPECT_RATIO: f64 = 0.05;
pub const MAX_ASPECT_RATIO: f64 = 3.0;

fn default_true() -> bool {
    true
}

/// Arbitrary HTML (usually a `<div>` plus `<script>`) dropped into the page
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HtmlEmbedBlock {
    pub code: Option<String>,
    pub caption: Option<String>,
}

impl Clean for HtmlEmbedBlock {
    fn summary(&self) -> &'static str {
        CODE_SUMMARY
    }

    fn clean(&self, profile: &Profile) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "code", self.code.as_deref());
        max_length(&mut errors, "caption", self.caption.as_deref(), 40);
        clean_html_field(&mut errors, "code", self.code.as_deref(), profile);
        errors
    }
}

/// Heading plus rich-text body
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CopyBlock {
    pub heading: Option<String>,
    pub body: Option<String>,
}

impl Clean for CopyBlock {
    fn clean(&self, _profile: &Profile) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "heading", self.heading.as_deref());
        require(&mut errors, "body", self.body.as_deref());
        errors
    }
}

/// HTML embed in one column, copy in the other
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TwoColumnHtmlEmbedBlock {
    #[serde(flatten)]
    pub embed: HtmlEmbedBlock,
    pub copy: CopyBlock,
    #[serde(default = "default_true")]
    pub text_on_left: bool,
}

impl Default for TwoColumnHtmlEmbedBlock {
    fn default() -> Self {
        Self {
            embed: HtmlEmbedBlock::default(),
            copy: CopyBlock::default(),
            text_on_left: true,
        }
    }
}

impl Clean for TwoColumnHtmlEmbedBlock {
    fn summary(&self) -> &'static str {
        CODE_SUMMARY
    }

    fn clean(&self, profile: &Profile) -> FieldErrors {
        let mut errors = self.embed.clean(profile);
        errors.extend_nested("copy", self.copy.clean(profile));
        errors
    }
}

/// Expandable heading with rich text beneath it
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AccordionBlock {
    pub heading: Option<String>,
    pub content: Option<String>,
    pub embed: Option<String>,
}

impl Clean for AccordionBlock {
    fn clean(&self, _profile: &Profile) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "heading", self.heading.as_deref());
        errors
    }
}

/// "Call to action" button: an optional link with display text
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CtaButtonBlock {
    #[serde(flatten)]
    pub link: LinkValue,
    pub styled_as_primary: bool,
}

impl Clean for CtaButtonBlock {
    fn summary(&self) -> &'static str {
        LINK_SUMMARY
    }

    fn clean(&self, _profile: &Profile) -> FieldErrors {
        clean_link(&self.link, false)
    }
}

/// Titled list of required links
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SidebarLinkBlock {
    pub title: Option<String>,
    pub links: Vec<LinkValue>,
}

impl Clean for SidebarLinkBlock {
    fn clean(&self, _profile: &Profile) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "title", self.title.as_deref());
        max_length(&mut errors, "title", self.title.as_deref(), 64);

        for (idx, link) in self.links.iter().enumerate() {
            errors.extend_nested(&format!("links.{}", idx), clean_link(link, true));
        }
        errors
    }
}

/// URL and text with an optional image
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimpleLinkBlock {
    pub display_text: Option<String>,
    pub link: Option<String>,
    pub image: Option<u64>,
}

impl Clean for SimpleLinkBlock {
    fn clean(&self, _profile: &Profile) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "display_text", self.display_text.as_deref());
        max_length(&mut errors, "display_text", self.display_text.as_deref(), 128);
        errors
    }
}

/// Full-width block of links laid out in columns
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ColumnatedLinksBlock {
    pub title: Option<String>,
    pub links: Vec<StreamChild>,
    pub cta_button: Option<CtaButtonBlock>,
}

impl ColumnatedLinksBlock {
    pub const MIN_LINKS: usize = 2;
}

impl Clean for ColumnatedLinksBlock {
    fn clean(&self, profile: &Profile) -> FieldErrors {
        let mut errors = FieldErrors::new();
        max_length(&mut errors, "title", self.title.as_deref(), 128);

        if self.links.len() < Self::MIN_LINKS {
            errors.add(
                "links",
                format!("The minimum number of items is {}", Self::MIN_LINKS),
            );
        }
        for (idx, child) in self.links.iter().enumerate() {
            errors.extend_nested(
                &format!("links.{}", idx),
                child.clean_as(&[BlockKind::SimpleLink], profile),
            );
        }

        if let Some(cta) = &self.cta_button {
            errors.extend_nested("cta_button", cta.clean(profile));
        }
        errors
    }
}

/// Card with an image header, title and a single link
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LinkTileBlock {
    pub image: Option<u64>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(alias = "link_block")]
    pub link: LinkWithoutText,
}

impl Clean for LinkTileBlock {
    fn clean(&self, profile: &Profile) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "title", self.title.as_deref());
        errors.extend_nested("link", self.link.clean(profile));
        errors
    }
}

/// Third-party page shown in an iframe
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExternalContentEmbedBlock {
    pub url: Option<String>,
    pub aspect_ratio: Option<f64>,
    pub allow_fullscreen: bool,
}

impl ExternalContentEmbedBlock {
    /// Aspect ratio to render with; unset falls back to letterbox
    pub fn effective_aspect_ratio(&self) -> f64 {
        self.aspect_ratio.unwrap_or(LETTERBOX_RATIO)
    }
}

impl Clean for ExternalContentEmbedBlock {
    fn clean(&self, _profile: &Profile) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "url", self.url.as_deref());

        if let Some(url) = self.url.as_deref().filter(|u| !u.trim().is_empty()) {
            if !is_https_url(url) {
                errors.add("url", "Enter a valid URL starting with https://");
            }
        }

        let ratio = self.effective_aspect_ratio();
        if ratio < MIN_ASPECT_RATIO {
            errors.add(
                "aspect_ratio",
                format!(
                    "Ensure this value is greater than or equal to {}.",
                    MIN_ASPECT_RATIO
                ),
            );
        } else if ratio > MAX_ASPECT_RATIO {
            errors.add(
                "aspect_ratio",
                format!(
                    "Ensure this value is less than or equal to {:.1}.",
                    MAX_ASPECT_RATIO
                ),
            );
        }
        errors
    }
}

fn is_https_url(url: &str) -> bool {
    regex::Regex::new(r"(?i)^https://[^\s/?#]+\.[^\s/?#]+([/?#]\S*)?$")
        .map(|re| re.is_match(url))
        .unwrap_or(false)
}

/// Large banner with optional video and call-to-action buttons
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FullHeroBlock {
    pub image: Option<u64>,
    pub heading: Option<String>,
    #[serde(default = "default_true")]
    pub heading_as_h1: bool,
    pub sub_heading: Option<String>,
    pub video_code: Option<String>,
    pub cta_buttons: Vec<StreamChild>,
}

impl Default for FullHeroBlock {
    fn default() -> Self {
        Self {
            image: None,
            heading: None,
            heading_as_h1: true,
            sub_heading: None,
            video_code: None,
            cta_buttons: Vec::new(),
        }
    }
}

impl Clean for FullHeroBlock {
    fn clean(&self, profile: &Profile) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require_id(&mut errors, "image", self.image);
        require(&mut errors, "heading", self.heading.as_deref());
        clean_html_field(&mut errors, "video_code", self.video_code.as_deref(), profile);

        for (idx, child) in self.cta_buttons.iter().enumerate() {
            errors.extend_nested(
                &format!("cta_buttons.{}", idx),
                child.clean_as(&[BlockKind::CtaButton], profile),
            );
        }
        errors
    }
}

/// Image on one side, text (and optional video) on the other
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TwoColumnBlock {
    pub image: Option<u64>,
    pub video_code: Option<String>,
    #[serde(default = "default_true")]
    pub text_on_left: bool,
    pub heading: Option<String>,
    pub use_as_h1: bool,
    pub sub_heading: Option<String>,
    pub cta_buttons: Vec<CtaButtonBlock>,
}

impl Default for TwoColumnBlock {
    fn default() -> Self {
        Self {
            image: None,
            video_code: None,
            text_on_left: true,
            heading: None,
            use_as_h1: false,
            sub_heading: None,
            cta_buttons: Vec::new(),
        }
    }
}

impl Clean for TwoColumnBlock {
    fn clean(&self, profile: &Profile) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require_id(&mut errors, "image", self.image);
        clean_html_field(&mut errors, "video_code", self.video_code.as_deref(), profile);

        for (idx, cta) in self.cta_buttons.iter().enumerate() {
            errors.extend_nested(&format!("cta_buttons.{}", idx), cta.clean(profile));
        }
        errors
    }
}
