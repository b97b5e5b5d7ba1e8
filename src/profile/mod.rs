//! Tokenizer Profiles
//!
//! Named element-handling policies, built in or loaded from TOML.

pub mod registry;
pub mod schema;

pub use registry::{ProfileRegistry, DEFAULT_PROFILE};
pub use schema::{ElementRules, Profile, ProfileFile, ProfileMeta};
