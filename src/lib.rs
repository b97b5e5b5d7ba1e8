//! Tag Balance
//!
//! Streaming tag-balance checks for raw HTML fragments entered into
//! content blocks.
//!
//! This library provides:
//! - A markup tokenizer emitting open/close tag events
//! - The tag-balance validator and document diagnostics
//! - Tokenizer profiles (built in or loaded from TOML)
//! - Field validation for block streams
//! - LSP protocol implementation

pub mod blocks;
pub mod config;
pub mod lsp;
pub mod markup;
pub mod profile;
pub mod validation;

// Re-exports for clean public API
pub use config::Config;
pub use markup::{tokenize, Position, TagEvent};
pub use profile::{Profile, ProfileRegistry};
pub use validation::{
    validate, validate_document, validate_with_profile, Diagnostic, ValidationOutcome, Violation,
};
