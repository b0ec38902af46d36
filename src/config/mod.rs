// src/config/mod.rs
pub mod types;

pub use self::types::{CheckConfig, Config, DisplayConfig, ExportConfig, PkgscopeToml};

use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "pkgscope.toml";

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `pkgscope.toml` from the working directory, falling back to
    /// defaults.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Loads from `path`. A missing file yields defaults; an unreadable or
    /// malformed one is reported and also yields defaults.
    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        let mut config = Self::new();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return config;
        }
        match fs::read_to_string(path) {
            Ok(content) => config.parse_toml(&content),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "failed to read config"),
        }
        config
    }

    /// Replaces the settings with those parsed from `content`.
    /// Leaves them untouched if `content` is not valid.
    pub fn parse_toml(&mut self, content: &str) {
        match toml::from_str::<PkgscopeToml>(content) {
            Ok(parsed) => *self = Self::from(parsed),
            Err(e) => tracing::warn!(error = %e, "ignoring malformed {CONFIG_FILE}"),
        }
    }
}
