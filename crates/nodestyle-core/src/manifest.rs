use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

use nodestyle_util::errors::{StyleError, StyleResult};
use nodestyle_util::fs::read_manifest_bytes;

use crate::DEFAULT_STYLE_FILE;

/// The parts of a `package.json` that matter for stylesheet resolution.
///
/// Every other field is ignored. `dependencies` keeps the declaration order
/// of the file, since that order is the output order when no explicit
/// ordering is configured.
///
/// Neither field is validated: a value of the wrong JSON type is read as if
/// the field were absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageManifest {
    /// Declared dependencies. Only the keys are used; the values (usually
    /// version ranges) are kept as raw JSON.
    #[serde(default, deserialize_with = "object_or_none")]
    pub dependencies: Option<IndexMap<String, serde_json::Value>>,

    /// Stylesheet entry point, relative to the package directory.
    #[serde(default, deserialize_with = "string_or_none")]
    pub style: Option<String>,
}

/// Any JSON value, with objects kept in declaration order.
#[derive(Deserialize)]
#[serde(untagged)]
enum Loose<T> {
    Wanted(T),
    Other(serde_json::Value),
}

fn object_or_none<'de, D>(
    deserializer: D,
) -> Result<Option<IndexMap<String, serde_json::Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Loose::deserialize(deserializer)? {
        Loose::Wanted(map) => Some(map),
        Loose::Other(_) => None,
    })
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Loose::deserialize(deserializer)? {
        Loose::Wanted(style) => Some(style),
        Loose::Other(_) => None,
    })
}

impl PackageManifest {
    /// Load and parse a `package.json` from the given path.
    pub fn from_path(path: &Path) -> StyleResult<Self> {
        let content = read_manifest_bytes(path)?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Parse `package.json` content. `origin` names the source in errors.
    ///
    /// Only content that is not valid UTF-8 JSON, or whose top level is not
    /// an object, is rejected.
    pub fn parse(content: impl AsRef<[u8]>, origin: &str) -> StyleResult<Self> {
        serde_json::from_slice(content.as_ref()).map_err(|e| {
            StyleError::ManifestParse {
                path: origin.to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Returns `true` if the manifest has a `dependencies` object.
    pub fn has_dependencies(&self) -> bool {
        self.dependencies.is_some()
    }

    /// Dependency names in declaration order.
    pub fn dependency_names(&self) -> impl Iterator<Item = &str> {
        self.dependencies
            .iter()
            .flat_map(|deps| deps.keys())
            .map(String::as_str)
    }

    /// The declared stylesheet entry, or [`DEFAULT_STYLE_FILE`] when the
    /// manifest has none. An empty `style` counts as absent.
    pub fn style_file(&self) -> &str {
        self.style
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_STYLE_FILE)
    }
}
