//! Core resolution pass: root manifest, per-dependency style lookup,
//! overrides, ordering and flattening.

use std::path::Path;

use nodestyle_core::config::{ResolverConfig, StyleOverride};
use nodestyle_core::manifest::PackageManifest;
use nodestyle_util::errors::StyleResult;
use nodestyle_util::fs::{is_absolute, join_normalized};

use crate::entry::{PackageEntry, StylePaths};

/// Resolve the ordered list of stylesheet paths for the configured project.
///
/// Fails if the root manifest or any consulted dependency manifest is
/// missing, empty, or not valid JSON. A root manifest without a
/// `dependencies` object resolves to an empty list.
///
/// Paths from list overrides are normalized and start with `./`, except
/// when `modules_dir` is absolute: those paths are returned absolute,
/// without the `./` prefix.
pub fn resolve(config: &ResolverConfig) -> StyleResult<Vec<String>> {
    let entries = resolve_entries(config)?;
    let paths = flatten(&entries);
    tracing::info!(
        "resolved {} stylesheet(s) from {} dependencies",
        paths.len(),
        entries.len()
    );
    Ok(paths)
}

/// Resolve one [`PackageEntry`] per declared, non-skipped dependency, in
/// output order.
pub fn resolve_entries(config: &ResolverConfig) -> StyleResult<Vec<PackageEntry>> {
    let manifest = PackageManifest::from_path(Path::new(&config.manifest_path))?;
    if !manifest.has_dependencies() {
        tracing::debug!("{} declares no dependencies", config.manifest_path);
        return Ok(Vec::new());
    }

    log_unmatched_keys(config, &manifest);

    let mut entries = Vec::new();
    for key in manifest.dependency_names() {
        if config.is_skipped(key) {
            tracing::debug!("skipping {key}");
            continue;
        }
        let entry = resolve_dependency(config, key)?;
        tracing::debug!("{entry}");
        entries.push(entry);
    }

    if config.should_sort() {
        // `sort_by` is stable, so equal (order, key) pairs keep manifest order.
        entries.sort_by(PackageEntry::cmp_order);
    }
    Ok(entries)
}

/// Flatten entries into paths, expanding multi-path entries in place.
pub fn flatten(entries: &[PackageEntry]) -> Vec<String> {
    entries
        .iter()
        .flat_map(|e| e.style.as_slice().iter().cloned())
        .collect()
}

fn resolve_dependency(config: &ResolverConfig, key: &str) -> StyleResult<PackageEntry> {
    let module_path = format!("{}/{key}", config.modules_dir);

    // The dependency's manifest is consulted even when an override replaces
    // its path, so a broken dependency still fails the resolution.
    let default_style = style_package_file(&module_path)?;

    let style = match config.override_for(key) {
        Some(StyleOverride::Multi(paths)) => StylePaths::Many(
            paths
                .iter()
                .map(|p| override_list_path(&config.modules_dir, key, p))
                .collect(),
        ),
        Some(StyleOverride::Single(path)) => StylePaths::One(format!("{module_path}/{path}")),
        None => StylePaths::One(default_style),
    };

    Ok(PackageEntry {
        key: key.to_string(),
        style,
        order: config.order_for(key),
    })
}

/// Read `<module_path>/package.json` and return the dependency's style path.
fn style_package_file(module_path: &str) -> StyleResult<String> {
    let manifest_path = format!("{module_path}/package.json");
    let manifest = PackageManifest::from_path(Path::new(&manifest_path))?;
    Ok(format!("{module_path}/{}", manifest.style_file()))
}

/// List overrides are normalized and, when relative, marked with `./`.
fn override_list_path(modules_dir: &str, key: &str, path: &str) -> String {
    let joined = join_normalized(&[modules_dir, key, path]);
    if is_absolute(&joined) {
        joined
    } else {
        format!("./{joined}")
    }
}

fn log_unmatched_keys(config: &ResolverConfig, manifest: &PackageManifest) {
    let declared: std::collections::HashSet<&str> = manifest.dependency_names().collect();
    let configured = config
        .skip
        .keys()
        .chain(config.overrides.keys())
        .chain(config.order.keys());
    for key in configured {
        if !declared.contains(key.as_str()) {
            tracing::debug!("ignoring configuration for undeclared dependency {key}");
        }
    }
}
