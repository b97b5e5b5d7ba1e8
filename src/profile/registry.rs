//! Profile Registry
//!
//! In-memory registry of named profiles. Built-in profiles are always
//! present; profile directories can add to or override them.

use super::schema::{Profile, ProfileFile};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Name of the profile used when nothing else is selected
pub const DEFAULT_PROFILE: &str = "strict";

/// Simple in-memory profile registry
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    profiles: HashMap<String, Profile>,
    active_profile: Option<String>,
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl ProfileRegistry {
    pub fn new() -> Self {
        Self {
            profiles: HashMap::new(),
            active_profile: None,
        }
    }

    /// Registry holding the built-in `strict` and `html5` profiles, `strict` active
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.add_profile(Profile::strict());
        registry.add_profile(Profile::html5());
        registry.set_active_profile(DEFAULT_PROFILE);
        registry
    }

    /// Add a profile, replacing any profile with the same name
    pub fn add_profile(&mut self, profile: Profile) {
        self.profiles.insert(profile.name.clone(), profile);
    }

    /// Set the active profile
    pub fn set_active_profile(&mut self, name: &str) -> bool {
        if self.profiles.contains_key(name) {
            self.active_profile = Some(name.to_string());
            true
        } else {
            false
        }
    }

    /// Get the currently active profile
    pub fn get_active_profile(&self) -> Option<&Profile> {
        self.active_profile
            .as_ref()
            .and_then(|name| self.profiles.get(name))
    }

    pub fn get_profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    /// List all available profiles, sorted by name
    pub fn list_profiles(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.profiles.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Load every `*.toml` profile in `dir`.
    ///
    /// A missing directory is not an error. Files that fail to parse are
    /// logged and skipped. Returns the number of profiles loaded.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize> {
        if !dir.is_dir() {
            log::debug!("Profile directory {:?} does not exist, skipping", dir);
            return Ok(0);
        }

        let mut paths: Vec<_> = fs::read_dir(dir)
            .with_context(|| format!("Failed to read profile directory {:?}", dir))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
            .collect();
        paths.sort();

        let mut loaded = 0;
        for path in paths {
            match load_profile_file(&path) {
                Ok(profile) => {
                    log::info!("Loaded profile '{}' from {:?}", profile.name, path);
                    self.add_profile(profile);
                    loaded += 1;
                }
                Err(e) => log::warn!("Skipping profile file {:?}: {:#}", path, e),
            }
        }

        Ok(loaded)
    }

    /// Detect a profile selection in the first or last five lines of a document.
    ///
    /// Matches `tagbalance-profile=<name>` (or `:`), typically inside an
    /// HTML comment. The returned name is not checked against the registry.
    pub fn detect_modeline_profile(&self, content: &str) -> Option<String> {
        self.detect_modeline(content).map(|(_, name)| name)
    }

    /// Like [`detect_modeline_profile`](Self::detect_modeline_profile), also
    /// returning the 1-based line the modeline was found on.
    pub fn detect_modeline(&self, content: &str) -> Option<(usize, String)> {
        let line_count = content.lines().count();

        let modeline_re = regex::Regex::new(r"tagbalance-profile\s*[:=]\s*([A-Za-z0-9_-]+)");
        let modeline_re = modeline_re.as_ref().ok()?;

        content
            .lines()
            .enumerate()
            .filter(|(idx, _)| *idx < 5 || idx + 5 >= line_count)
            .find_map(|(idx, line)| {
                modeline_re
                    .captures(line)
                    .and_then(|captures| captures.get(1))
                    .map(|m| (idx + 1, m.as_str().to_string()))
            })
    }
}

fn load_profile_file(path: &Path) -> Result<Profile> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    let file: ProfileFile =
        toml::from_str(&content).with_context(|| format!("Invalid profile TOML in {:?}", path))?;
    Ok(Profile::from(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry() {
        let registry = ProfileRegistry::with_builtin();
        assert_eq!(registry.list_profiles(), vec!["html5", "strict"]);
        assert_eq!(registry.get_active_profile().unwrap().name, "strict");
    }

    #[test]
    fn test_empty_registry() {
        let registry = ProfileRegistry::new();
        assert!(registry.list_profiles().is_empty());
        assert!(registry.get_active_profile().is_none());
    }

    #[test]
    fn test_nonexistent_profile() {
        let mut registry = ProfileRegistry::with_builtin();
        assert!(!registry.set_active_profile("nonexistent"));
        assert_eq!(registry.get_active_profile().unwrap().name, "strict");
    }

    #[test]
    fn test_modeline_detection() {
        let registry = ProfileRegistry::with_builtin();

        let content = "<!-- tagbalance-profile=html5 -->\n<p>a<br>b</p>";
        assert_eq!(
            registry.detect_modeline_profile(content),
            Some("html5".to_string())
        );

        let content = "<div></div>\n<!-- tagbalance-profile: my_email -->";
        assert_eq!(
            registry.detect_modeline_profile(content),
            Some("my_email".to_string())
        );

        assert_eq!(registry.detect_modeline_profile("<div></div>"), None);
    }

    #[test]
    fn test_modeline_reports_its_line() {
        let registry = ProfileRegistry::with_builtin();

        let mut lines: Vec<String> = (0..20).map(|i| format!("<p>{}</p>", i)).collect();
        lines[17] = "<!-- tagbalance-profile=html5 -->".to_string();
        assert_eq!(
            registry.detect_modeline(&lines.join("\n")),
            Some((18, "html5".to_string()))
        );
    }

    #[test]
    fn test_modeline_only_checks_head_and_tail() {
        let registry = ProfileRegistry::with_builtin();

        let mut lines: Vec<String> = (0..20).map(|i| format!("<p>{}</p>", i)).collect();
        lines[10] = "<!-- tagbalance-profile=html5 -->".to_string();
        assert_eq!(registry.detect_modeline_profile(&lines.join("\n")), None);

        lines[18] = "<!-- tagbalance-profile=html5 -->".to_string();
        assert_eq!(
            registry.detect_modeline_profile(&lines.join("\n")),
            Some("html5".to_string())
        );
    }
}
