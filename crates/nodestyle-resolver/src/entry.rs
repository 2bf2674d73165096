//! Per-dependency resolution results and their ordering.

use serde::Serialize;
use std::cmp::Ordering;

/// Stylesheet path(s) resolved for one dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StylePaths {
    One(String),
    Many(Vec<String>),
}

impl StylePaths {
    /// The paths in output order.
    pub fn as_slice(&self) -> &[String] {
        match self {
            Self::One(path) => std::slice::from_ref(path),
            Self::Many(paths) => paths,
        }
    }
}

/// One declared, non-skipped dependency after overrides are applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageEntry {
    pub key: String,
    pub style: StylePaths,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

impl PackageEntry {
    /// Compare by explicit order, then by key.
    ///
    /// Entries without an order sort after every entry with one.
    pub fn cmp_order(&self, other: &Self) -> Ordering {
        let rank = |e: &Self| (e.order.is_none(), e.order);
        rank(self)
            .cmp(&rank(other))
            .then_with(|| self.key.cmp(&other.key))
    }
}

impl std::fmt::Display for PackageEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.key, self.style.as_slice().join(", "))?;
        if let Some(order) = self.order {
            write!(f, " (order {order})")?;
        }
        Ok(())
    }
}
