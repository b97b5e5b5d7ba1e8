//! Markup Tokenizer
//!
//! Turns raw markup into a document-ordered stream of tag events.
//! Only tag structure is extracted; text content is never copied.

pub mod event;
pub mod lexer;

pub use event::{Position, TagEvent};
pub use lexer::{tokenize, Tokenizer};
