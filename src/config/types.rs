use serde::{Deserialize, Serialize};

use crate::export::DEFAULT_EXPORT_FILE;
use crate::graph::EXTERNAL_TAG_PREFIX;
use crate::policy::LayerTags;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Tags starting with any of these are hidden from lists and the tag
    /// picker. They still count for tag filtering and layer checks.
    #[serde(default = "default_hidden_prefixes")]
    pub hidden_tag_prefixes: Vec<String>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            hidden_tag_prefixes: default_hidden_prefixes(),
        }
    }
}

fn default_hidden_prefixes() -> Vec<String> {
    vec![EXTERNAL_TAG_PREFIX.to_string()]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_export_path")]
    pub path: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            path: default_export_path(),
        }
    }
}

fn default_export_path() -> String {
    DEFAULT_EXPORT_FILE.to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Exit with the cycles-found code when `cycles` reports any.
    #[serde(default)]
    pub fail_on_cycles: bool,
}

/// On-disk shape of `pkgscope.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PkgscopeToml {
    #[serde(default)]
    pub policy: LayerTags,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub check: CheckConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub policy: LayerTags,
    pub display: DisplayConfig,
    pub export: ExportConfig,
    pub check: CheckConfig,
}

impl From<PkgscopeToml> for Config {
    fn from(toml: PkgscopeToml) -> Self {
        Self {
            policy: toml.policy,
            display: toml.display,
            export: toml.export,
            check: toml.check,
        }
    }
}
