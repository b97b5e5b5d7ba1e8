//! Configuration management for tag-balance.
//!
//! Handles:
//! - Command-line argument parsing
//! - Profile directory configuration
//! - Logger setup

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use crate::profile::{ProfileRegistry, DEFAULT_PROFILE};

// Shared by the checker and the language server. Carries no `name` or
// `about` so `tagbalance` can flatten it and keep its own.
#[derive(Debug, Clone, Parser)]
#[command(version)]
pub struct Args {
    /// Explicitly specify the profile to use
    #[arg(long, help = "Profile to use (e.g., 'strict', 'html5')")]
    pub profile: Option<String>,

    /// Custom profile directory to search for profile files
    #[arg(long, help = "Directory containing profile TOML files")]
    pub profile_dir: Option<PathBuf>,

    /// Log level, used when RUST_LOG is not set
    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Profile name explicitly set via command line
    pub cli_profile: Option<String>,
    /// Profile directories, later entries override earlier ones
    pub profile_dirs: Vec<PathBuf>,
    /// Log level
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cli_profile: None,
            profile_dirs: Vec::new(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let mut profile_dirs = Vec::new();

        // User-global directory first so an explicit directory wins
        if let Some(config_dir) = dirs::config_dir() {
            profile_dirs.push(config_dir.join("tagbalance").join("profiles"));
        }

        if let Some(custom_dir) = args.profile_dir {
            profile_dirs.push(custom_dir);
        }

        Ok(Config {
            cli_profile: args.profile,
            profile_dirs,
            log_level: args.log_level,
        })
    }

    /// Get the effective profile name
    pub fn get_effective_profile(&self) -> String {
        self.cli_profile
            .clone()
            .unwrap_or_else(|| DEFAULT_PROFILE.to_string())
    }

    /// Build a profile registry from built-ins plus every profile directory,
    /// activating the effective profile.
    pub fn build_registry(&self) -> Result<ProfileRegistry> {
        let mut registry = ProfileRegistry::with_builtin();

        for dir in &self.profile_dirs {
            registry.load_dir(dir)?;
        }

        let name = self.get_effective_profile();
        if !registry.set_active_profile(&name) {
            anyhow::bail!(
                "Unknown profile '{}' (available: {})",
                name,
                registry.list_profiles().join(", ")
            );
        }

        Ok(registry)
    }

    /// Initialise `env_logger`, falling back to the configured level
    pub fn init_logging(&self) -> Result<()> {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(self.log_level.as_str()),
        )
        .try_init()
        .context("Failed to initialise logger")
    }
}
