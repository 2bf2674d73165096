use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use nodestyle_util::errors::{StyleError, StyleResult};

use crate::{CONFIG_FILE_NAME, DEFAULT_MANIFEST_PATH, DEFAULT_MODULES_DIR};

/// Replacement stylesheet path(s) for a single dependency.
///
/// Written in configuration either as a single string or as a list of
/// strings. The two forms join differently; see the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleOverride {
    Single(String),
    Multi(Vec<String>),
}

impl StyleOverride {
    /// A single empty path carries no override.
    pub fn is_effective(&self) -> bool {
        match self {
            Self::Single(path) => !path.is_empty(),
            Self::Multi(_) => true,
        }
    }
}

/// The complete, immutable configuration for one resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResolverConfig {
    pub manifest_path: String,
    pub modules_dir: String,
    #[serde(default)]
    pub skip: BTreeMap<String, bool>,
    #[serde(default)]
    pub overrides: BTreeMap<String, StyleOverride>,
    #[serde(default)]
    pub order: BTreeMap<String, i64>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            manifest_path: DEFAULT_MANIFEST_PATH.to_string(),
            modules_dir: DEFAULT_MODULES_DIR.to_string(),
            skip: BTreeMap::new(),
            overrides: BTreeMap::new(),
            order: BTreeMap::new(),
        }
    }
}

impl ResolverConfig {
    /// Apply caller-supplied settings over this configuration.
    ///
    /// Each field present in `overrides` replaces the whole field here;
    /// maps are not merged key by key.
    pub fn merge(self, overrides: ConfigOverrides) -> Self {
        Self {
            manifest_path: overrides.manifest_path.unwrap_or(self.manifest_path),
            modules_dir: overrides.modules_dir.unwrap_or(self.modules_dir),
            skip: overrides.skip.unwrap_or(self.skip),
            overrides: overrides.overrides.unwrap_or(self.overrides),
            order: overrides.order.unwrap_or(self.order),
        }
    }

    /// Whether `name` is flagged to be left out of resolution.
    pub fn is_skipped(&self, name: &str) -> bool {
        self.skip.get(name).copied().unwrap_or(false)
    }

    /// The effective style override for `name`, if any.
    pub fn override_for(&self, name: &str) -> Option<&StyleOverride> {
        self.overrides.get(name).filter(|o| o.is_effective())
    }

    /// Explicit sort position for `name`, if configured.
    pub fn order_for(&self, name: &str) -> Option<i64> {
        self.order.get(name).copied()
    }

    /// Entries are only sorted when at least one order value is configured.
    pub fn should_sort(&self) -> bool {
        !self.order.is_empty()
    }

    /// Render the configuration as TOML.
    pub fn to_toml(&self) -> StyleResult<String> {
        toml::to_string_pretty(self).map_err(|e| {
            StyleError::Config {
                message: format!("Failed to serialize configuration: {e}"),
            }
            .into()
        })
    }
}

/// A partial configuration, as read from `nodestyle.toml` or assembled from
/// command-line flags. Absent fields fall through to the layer below.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigOverrides {
    #[serde(default)]
    pub manifest_path: Option<String>,
    #[serde(default)]
    pub modules_dir: Option<String>,
    #[serde(default)]
    pub skip: Option<BTreeMap<String, bool>>,
    #[serde(default)]
    pub overrides: Option<BTreeMap<String, StyleOverride>>,
    #[serde(default)]
    pub order: Option<BTreeMap<String, i64>>,
}

impl ConfigOverrides {
    /// Load overrides from a TOML file.
    pub fn load(path: &Path) -> StyleResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| StyleError::Config {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        tracing::debug!("loaded configuration from {}", path.display());
        Self::from_toml(&content)
    }

    /// Load `nodestyle.toml` from `dir`, or return empty overrides if the
    /// file doesn't exist.
    pub fn discover(dir: &Path) -> StyleResult<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse overrides from TOML content.
    pub fn from_toml(content: &str) -> StyleResult<Self> {
        toml::from_str(content).map_err(|e| {
            StyleError::Config {
                message: format!("Failed to parse configuration: {e}"),
            }
            .into()
        })
    }

    /// Stack `higher` on top of `self`; fields set in `higher` win.
    pub fn layered_with(self, higher: ConfigOverrides) -> Self {
        Self {
            manifest_path: higher.manifest_path.or(self.manifest_path),
            modules_dir: higher.modules_dir.or(self.modules_dir),
            skip: higher.skip.or(self.skip),
            overrides: higher.overrides.or(self.overrides),
            order: higher.order.or(self.order),
        }
    }

    /// Resolve against the built-in defaults.
    pub fn into_config(self) -> ResolverConfig {
        ResolverConfig::default().merge(self)
    }
}
