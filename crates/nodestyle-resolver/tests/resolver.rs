use std::collections::BTreeMap;
use std::path::Path;

use nodestyle_core::config::{ConfigOverrides, ResolverConfig, StyleOverride};
use nodestyle_resolver::{resolve, resolve_entries};
use nodestyle_util::errors::{StyleError, StyleResult};
use tempfile::TempDir;

/// A project directory with a root manifest and a modules directory.
struct Project {
    tmp: TempDir,
}

impl Project {
    fn new(root_manifest: &str) -> Self {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("package.json"), root_manifest).unwrap();
        std::fs::create_dir_all(tmp.path().join("nm")).unwrap();
        Self { tmp }
    }

    fn with_deps(names: &[&str]) -> Self {
        // Written by hand so the declaration order survives.
        let deps = names
            .iter()
            .map(|n| format!("{}: \"1.0.0\"", serde_json::Value::from(*n)))
            .collect::<Vec<_>>()
            .join(", ");
        let project = Self::new(&format!("{{\"dependencies\": {{{deps}}}}}"));
        for name in names {
            project.module(name, "{}");
        }
        project
    }

    fn module(&self, name: &str, manifest: &str) {
        let dir = self.tmp.path().join("nm").join(name);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("package.json"), manifest).unwrap();
    }

    fn root(&self) -> &Path {
        self.tmp.path()
    }

    fn nm(&self) -> String {
        self.root().join("nm").display().to_string()
    }

    fn config(&self) -> ConfigOverrides {
        ConfigOverrides {
            manifest_path: Some(self.root().join("package.json").display().to_string()),
            modules_dir: Some(self.nm()),
            ..Default::default()
        }
    }

    fn resolve(&self, overrides: ConfigOverrides) -> StyleResult<Vec<String>> {
        resolve(&self.config().layered_with(overrides).into_config())
    }
}

fn order(pairs: &[(&str, i64)]) -> ConfigOverrides {
    ConfigOverrides {
        order: Some(pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()),
        ..Default::default()
    }
}

#[test]
fn test_declared_style_entry() {
    let project = Project::new(r#"{"dependencies":{"foo":"1.0.0"}}"#);
    project.module("foo", r#"{"style":"main.css"}"#);
    let paths = project.resolve(ConfigOverrides::default()).unwrap();
    assert_eq!(paths, vec![format!("{}/foo/main.css", project.nm())]);
}

#[test]
fn test_default_style_entry() {
    let project = Project::new(r#"{"dependencies":{"foo":"1.0.0"}}"#);
    project.module("foo", r#"{"name":"foo"}"#);
    let paths = project.resolve(ConfigOverrides::default()).unwrap();
    assert_eq!(paths, vec![format!("{}/foo/style.css", project.nm())]);
}

#[test]
fn test_no_dependencies_field_is_empty() {
    let project = Project::new(r#"{"name":"app","devDependencies":{"x":"1"}}"#);
    assert!(project.resolve(ConfigOverrides::default()).unwrap().is_empty());
}

#[test]
fn test_non_object_dependencies_field_is_empty() {
    for deps in ["[]", "false", "0"] {
        let project = Project::new(&format!("{{\"dependencies\": {deps}}}"));
        let paths = project.resolve(ConfigOverrides::default()).unwrap();
        assert!(paths.is_empty(), "dependencies = {deps}");
    }
}

#[test]
fn test_dependency_manifest_other_fields_are_not_checked() {
    let project = Project::new(r#"{"dependencies":{"foo":"1.0.0","bar":"1.0.0"}}"#);
    project.module("foo", r#"{"dependencies":"x","style":"a.css"}"#);
    project.module("bar", r#"{"style":42,"dependencies":[1,2]}"#);
    let paths = project.resolve(ConfigOverrides::default()).unwrap();
    let nm = project.nm();
    assert_eq!(
        paths,
        vec![format!("{nm}/foo/a.css"), format!("{nm}/bar/style.css")]
    );
}

#[test]
fn test_declaration_order_without_order_map() {
    let project = Project::with_deps(&["zeta", "alpha", "mid"]);
    let paths = project.resolve(ConfigOverrides::default()).unwrap();
    let nm = project.nm();
    assert_eq!(
        paths,
        vec![
            format!("{nm}/zeta/style.css"),
            format!("{nm}/alpha/style.css"),
            format!("{nm}/mid/style.css"),
        ]
    );
}

#[test]
fn test_order_map_sorts_ascending() {
    let project = Project::with_deps(&["a", "b"]);
    let entries = resolve_entries(
        &project
            .config()
            .layered_with(order(&[("a", 2), ("b", 1)]))
            .into_config(),
    )
    .unwrap();
    let keys: Vec<&str> = entries.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["b", "a"]);
}

#[test]
fn test_unordered_entries_sort_last_by_name() {
    let project = Project::with_deps(&["zeta", "beta", "alpha", "gamma"]);
    let paths = project.resolve(order(&[("gamma", 1)])).unwrap();
    let nm = project.nm();
    assert_eq!(
        paths,
        vec![
            format!("{nm}/gamma/style.css"),
            format!("{nm}/alpha/style.css"),
            format!("{nm}/beta/style.css"),
            format!("{nm}/zeta/style.css"),
        ]
    );
}

#[test]
fn test_order_for_undeclared_dependency_still_sorts() {
    let project = Project::with_deps(&["zeta", "alpha"]);
    let paths = project.resolve(order(&[("missing", 1)])).unwrap();
    let nm = project.nm();
    assert_eq!(
        paths,
        vec![format!("{nm}/alpha/style.css"), format!("{nm}/zeta/style.css")]
    );
}

#[test]
fn test_skipped_dependency_is_excluded() {
    let project = Project::with_deps(&["keep", "drop"]);
    let paths = project
        .resolve(ConfigOverrides {
            skip: Some(BTreeMap::from([("drop".to_string(), true)])),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(paths, vec![format!("{}/keep/style.css", project.nm())]);
}

#[test]
fn test_skipped_dependency_manifest_is_not_read() {
    let project = Project::new(r#"{"dependencies":{"ghost":"1.0.0"}}"#);
    let paths = project
        .resolve(ConfigOverrides {
            skip: Some(BTreeMap::from([("ghost".to_string(), true)])),
            ..Default::default()
        })
        .unwrap();
    assert!(paths.is_empty());
}

#[test]
fn test_single_override() {
    let project = Project::with_deps(&["pkg"]);
    let paths = project
        .resolve(ConfigOverrides {
            overrides: Some(BTreeMap::from([(
                "pkg".to_string(),
                StyleOverride::Single("x.css".to_string()),
            )])),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(paths, vec![format!("{}/pkg/x.css", project.nm())]);
}

#[test]
fn test_list_override_keeps_list_order() {
    let project = Project::with_deps(&["first", "pkg", "last"]);
    let paths = project
        .resolve(ConfigOverrides {
            overrides: Some(BTreeMap::from([(
                "pkg".to_string(),
                StyleOverride::Multi(vec!["b/c.css".to_string(), "a.css".to_string()]),
            )])),
            ..Default::default()
        })
        .unwrap();
    let nm = project.nm();
    assert_eq!(
        paths,
        vec![
            format!("{nm}/first/style.css"),
            format!("{nm}/pkg/b/c.css"),
            format!("{nm}/pkg/a.css"),
            format!("{nm}/last/style.css"),
        ]
    );
}

#[test]
fn test_override_for_undeclared_dependency_is_ignored() {
    let project = Project::with_deps(&["pkg"]);
    let paths = project
        .resolve(ConfigOverrides {
            overrides: Some(BTreeMap::from([(
                "other".to_string(),
                StyleOverride::Single("x.css".to_string()),
            )])),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(paths, vec![format!("{}/pkg/style.css", project.nm())]);
}

#[test]
fn test_missing_root_manifest_fails() {
    let config = ResolverConfig {
        manifest_path: "/nonexistent/nodestyle/package.json".to_string(),
        ..Default::default()
    };
    let err = resolve(&config).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<StyleError>(),
        Some(StyleError::ManifestNotFound { .. })
    ));
}

#[test]
fn test_empty_root_manifest_fails() {
    let project = Project::new("");
    let err = project.resolve(ConfigOverrides::default()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<StyleError>(),
        Some(StyleError::ManifestNotFound { .. })
    ));
}

#[test]
fn test_missing_dependency_manifest_fails() {
    let project = Project::new(r#"{"dependencies":{"ghost":"1.0.0"}}"#);
    let err = project.resolve(ConfigOverrides::default()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<StyleError>(),
        Some(StyleError::ManifestNotFound { .. })
    ));
}

#[test]
fn test_missing_dependency_manifest_fails_even_with_override() {
    let project = Project::new(r#"{"dependencies":{"ghost":"1.0.0"}}"#);
    let err = project
        .resolve(ConfigOverrides {
            overrides: Some(BTreeMap::from([(
                "ghost".to_string(),
                StyleOverride::Single("x.css".to_string()),
            )])),
            ..Default::default()
        })
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<StyleError>(),
        Some(StyleError::ManifestNotFound { .. })
    ));
}

#[test]
fn test_malformed_root_manifest_fails() {
    let project = Project::new("{\"dependencies\": {");
    let err = project.resolve(ConfigOverrides::default()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<StyleError>(),
        Some(StyleError::ManifestParse { .. })
    ));
}

#[test]
fn test_invalid_utf8_dependency_manifest_is_a_parse_error() {
    let project = Project::with_deps(&["foo"]);
    let dir = project.root().join("nm").join("foo");
    std::fs::write(dir.join("package.json"), [b'{', 0xff, 0xfe, b'}']).unwrap();
    let err = project.resolve(ConfigOverrides::default()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<StyleError>(),
        Some(StyleError::ManifestParse { .. })
    ));
}

#[test]
fn test_malformed_dependency_manifest_fails() {
    let project = Project::with_deps(&["good", "bad"]);
    project.module("bad", "{style: main.css}");
    let err = project.resolve(ConfigOverrides::default()).unwrap_err();
    match err.downcast_ref::<StyleError>() {
        Some(StyleError::ManifestParse { path, .. }) => {
            assert!(path.ends_with("bad/package.json"), "got: {path}")
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
