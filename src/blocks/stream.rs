//! Block streams
//!
//! A page body is a JSON list of `{"type": ..., "value": ...}` children.
//! Each child is dispatched to its block type and cleaned.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::blocks::content::{
    AccordionBlock, ColumnatedLinksBlock, CopyBlock, CtaButtonBlock, ExternalContentEmbedBlock,
    FullHeroBlock, HtmlEmbedBlock, LinkTileBlock, SidebarLinkBlock, SimpleLinkBlock,
    TwoColumnBlock, TwoColumnHtmlEmbedBlock,
};
use crate::blocks::fields::{Clean, FieldErrors};
use crate::blocks::links::LinkBlock;
use crate::profile::Profile;

/// Block types with field checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Accordion,
    ColumnatedLinks,
    Copy,
    CtaButton,
    ExternalContentEmbed,
    FullHero,
    HtmlEmbed,
    LinkBlock,
    SidebarLink,
    SimpleLink,
    Tile,
    TwoColumn,
    TwoColumnHtmlEmbed,
}

impl BlockKind {
    pub const ALL: [BlockKind; 13] = [
        BlockKind::Accordion,
        BlockKind::ColumnatedLinks,
        BlockKind::Copy,
        BlockKind::CtaButton,
        BlockKind::ExternalContentEmbed,
        BlockKind::FullHero,
        BlockKind::HtmlEmbed,
        BlockKind::LinkBlock,
        BlockKind::SidebarLink,
        BlockKind::SimpleLink,
        BlockKind::Tile,
        BlockKind::TwoColumn,
        BlockKind::TwoColumnHtmlEmbed,
    ];

    pub fn type_name(&self) -> &'static str {
        match self {
            BlockKind::Accordion => "accordion",
            BlockKind::ColumnatedLinks => "columnated_links",
            BlockKind::Copy => "copy",
            BlockKind::CtaButton => "cta_button",
            BlockKind::ExternalContentEmbed => "external_content_embed",
            BlockKind::FullHero => "full_hero",
            BlockKind::HtmlEmbed => "html_embed",
            BlockKind::LinkBlock => "link_block",
            BlockKind::SidebarLink => "sidebar_link",
            BlockKind::SimpleLink => "simple_link",
            BlockKind::Tile => "tile",
            BlockKind::TwoColumn => "two_column",
            BlockKind::TwoColumnHtmlEmbed => "two_column_html_embed",
        }
    }

    pub fn from_type_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.type_name() == name)
    }

    /// Deserialize `value` as this block type and clean it
    fn clean_value(
        &self,
        value: &serde_json::Value,
        profile: &Profile,
    ) -> Result<(&'static str, FieldErrors), serde_json::Error> {
        match self {
            BlockKind::Accordion => clean_as::<AccordionBlock>(value, profile),
            BlockKind::ColumnatedLinks => clean_as::<ColumnatedLinksBlock>(value, profile),
            BlockKind::Copy => clean_as::<CopyBlock>(value, profile),
            BlockKind::CtaButton => clean_as::<CtaButtonBlock>(value, profile),
            BlockKind::ExternalContentEmbed => {
                clean_as::<ExternalContentEmbedBlock>(value, profile)
            }
            BlockKind::FullHero => clean_as::<FullHeroBlock>(value, profile),
            BlockKind::HtmlEmbed => clean_as::<HtmlEmbedBlock>(value, profile),
            BlockKind::LinkBlock => clean_as::<LinkBlock>(value, profile),
            BlockKind::SidebarLink => clean_as::<SidebarLinkBlock>(value, profile),
            BlockKind::SimpleLink => clean_as::<SimpleLinkBlock>(value, profile),
            BlockKind::Tile => clean_as::<LinkTileBlock>(value, profile),
            BlockKind::TwoColumn => clean_as::<TwoColumnBlock>(value, profile),
            BlockKind::TwoColumnHtmlEmbed => clean_as::<TwoColumnHtmlEmbedBlock>(value, profile),
        }
    }
}

fn clean_as<T>(
    value: &serde_json::Value,
    profile: &Profile,
) -> Result<(&'static str, FieldErrors), serde_json::Error>
where
    T: Clean + DeserializeOwned,
{
    let block = T::deserialize(value)?;
    Ok((block.summary(), block.clean(profile)))
}

/// One child of a block stream
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StreamChild {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub value: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl StreamChild {
    pub fn new(kind: BlockKind, value: serde_json::Value) -> Self {
        Self {
            block_type: kind.type_name().to_string(),
            value,
            id: None,
        }
    }

    pub fn kind(&self) -> Option<BlockKind> {
        BlockKind::from_type_name(&self.block_type)
    }

    /// Clean a nested child that may only be one of `allowed`
    pub(crate) fn clean_as(&self, allowed: &[BlockKind], profile: &Profile) -> FieldErrors {
        let mut errors = FieldErrors::new();
        match self.kind().filter(|kind| allowed.contains(kind)) {
            Some(kind) => match kind.clean_value(&self.value, profile) {
                Ok((_, fields)) => return fields,
                Err(e) => errors.add("value", format!("Invalid block value: {}", e)),
            },
            None => errors.add("type", format!("Unexpected block type '{}'", self.block_type)),
        }
        errors
    }
}

/// Why a block was rejected
#[derive(Debug, Error)]
pub enum BlockError {
    #[error("{summary}: {fields}")]
    Invalid {
        summary: &'static str,
        fields: FieldErrors,
    },
    #[error("malformed '{block_type}' value")]
    Malformed {
        block_type: String,
        #[source]
        source: serde_json::Error,
    },
}

impl BlockError {
    /// Field errors, if the block was well-formed but invalid
    pub fn fields(&self) -> Option<&FieldErrors> {
        match self {
            BlockError::Invalid { fields, .. } => Some(fields),
            BlockError::Malformed { .. } => None,
        }
    }
}

/// A rejected child of a stream
#[derive(Debug, Error)]
#[error("block {index} ({block_type}): {error}")]
pub struct StreamError {
    pub index: usize,
    pub block_type: String,
    #[source]
    pub error: BlockError,
}

/// Validate a single stream child.
///
/// Block types without field checks (heroes, newsletter forms, ...) are
/// accepted as-is.
pub fn validate_block(child: &StreamChild, profile: &Profile) -> Result<(), BlockError> {
    let Some(kind) = child.kind() else {
        log::debug!("No field checks for block type '{}'", child.block_type);
        return Ok(());
    };

    let (summary, fields) =
        kind.clean_value(&child.value, profile)
            .map_err(|source| BlockError::Malformed {
                block_type: child.block_type.clone(),
                source,
            })?;

    if fields.is_empty() {
        Ok(())
    } else {
        Err(BlockError::Invalid { summary, fields })
    }
}

/// Validate every child of a stream, collecting one error per rejected block
pub fn validate_stream(children: &[StreamChild], profile: &Profile) -> Vec<StreamError> {
    children
        .iter()
        .enumerate()
        .filter_map(|(index, child)| {
            validate_block(child, profile).err().map(|error| StreamError {
                index,
                block_type: child.block_type.clone(),
                error,
            })
        })
        .collect()
}

/// Parse a JSON block stream
pub fn parse_stream(json: &str) -> Result<Vec<StreamChild>, serde_json::Error> {
    serde_json::from_str(json)
}
