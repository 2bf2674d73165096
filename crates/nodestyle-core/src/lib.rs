//! Core data types for nodestyle.
//!
//! This crate defines the parsed `package.json` manifest and the resolver
//! configuration, including the defaults every resolution starts from.
//!
//! This crate is intentionally free of any resolution logic.

/// Root manifest location used when the configuration does not name one.
pub const DEFAULT_MANIFEST_PATH: &str = "./package.json";

/// Dependency modules directory used when the configuration does not name one.
pub const DEFAULT_MODULES_DIR: &str = "./node_modules";

/// Stylesheet entry assumed for a dependency whose manifest has no `style`.
pub const DEFAULT_STYLE_FILE: &str = "style.css";

/// File name of the optional per-project configuration file.
pub const CONFIG_FILE_NAME: &str = "nodestyle.toml";

pub mod config;
pub mod manifest;
