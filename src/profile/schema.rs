//! Profile Schema Types
//!
//! A profile decides how the tokenizer reads element names: which elements
//! close themselves, which hold raw text, and whether names are case-folded.

use serde::Deserialize;
use std::collections::HashSet;

/// HTML elements that never take a closing tag
pub const HTML5_VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Elements whose content is not markup
pub const DEFAULT_RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Root profile file structure (matches TOML)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ProfileFile {
    pub profile: ProfileMeta,
    #[serde(default)]
    pub elements: ElementRules,
}

/// Profile metadata
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ProfileMeta {
    pub name: String,
    pub description: Option<String>,
}

/// Element handling rules
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ElementRules {
    pub void: Vec<String>,
    pub raw_text: Vec<String>,
    pub case_sensitive: bool,
}

impl Default for ElementRules {
    fn default() -> Self {
        Self {
            void: Vec::new(),
            raw_text: DEFAULT_RAW_TEXT_ELEMENTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            case_sensitive: false,
        }
    }
}

/// Runtime profile (optimized for lookups)
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub name: String,
    pub description: Option<String>,
    void: HashSet<String>,
    raw_text: HashSet<String>,
    case_sensitive: bool,
}

impl Profile {
    /// Every tag must be closed explicitly, either with an end tag or `/>`.
    pub fn strict() -> Self {
        Self::from(ProfileFile {
            profile: ProfileMeta {
                name: "strict".to_string(),
                description: Some("Every tag needs a closing tag or a trailing '/>'".to_string()),
            },
            elements: ElementRules::default(),
        })
    }

    /// HTML void elements (`<br>`, `<img>`, ...) close themselves.
    pub fn html5() -> Self {
        Self::from(ProfileFile {
            profile: ProfileMeta {
                name: "html5".to_string(),
                description: Some("HTML void elements close themselves".to_string()),
            },
            elements: ElementRules {
                void: HTML5_VOID_ELEMENTS.iter().map(|s| s.to_string()).collect(),
                ..ElementRules::default()
            },
        })
    }

    /// Fold a tag name the way this profile compares names
    pub fn normalize_name(&self, name: &str) -> String {
        if self.case_sensitive {
            name.to_string()
        } else {
            name.to_ascii_lowercase()
        }
    }

    /// `name` must already be normalized
    pub fn is_void(&self, name: &str) -> bool {
        self.void.contains(name)
    }

    /// `name` must already be normalized
    pub fn is_raw_text(&self, name: &str) -> bool {
        self.raw_text.contains(name)
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::strict()
    }
}

impl From<ProfileFile> for Profile {
    fn from(file: ProfileFile) -> Self {
        let case_sensitive = file.elements.case_sensitive;
        let fold = |names: Vec<String>| -> HashSet<String> {
            names
                .into_iter()
                .map(|n| if case_sensitive { n } else { n.to_ascii_lowercase() })
                .collect()
        };

        Self {
            name: file.profile.name,
            description: file.profile.description,
            void: fold(file.elements.void),
            raw_text: fold(file.elements.raw_text),
            case_sensitive,
        }
    }
}
