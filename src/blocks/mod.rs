//! Block Field Validation
//!
//! Cross-field checks for the content blocks editors compose into pages:
//! raw HTML fields must have balanced tags, and link fields must name the
//! right number of targets.

pub mod content;
pub mod fields;
pub mod html;
pub mod links;
pub mod stream;

pub use fields::{Clean, FieldErrors};
pub use html::clean_html_field;
pub use links::{clean_link, clean_link_without_text, LinkBlock, LinkValue, LinkWithoutText};
pub use stream::{
    parse_stream, validate_block, validate_stream, BlockError, BlockKind, StreamChild,
    StreamError,
};
