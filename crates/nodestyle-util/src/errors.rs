use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all nodestyle operations.
#[derive(Debug, Error, Diagnostic)]
pub enum StyleError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A `package.json` could not be read, or was empty.
    #[error("package.json not found: {path} ({reason})")]
    #[diagnostic(help("Check that the manifest path and modules directory are correct"))]
    ManifestNotFound { path: String, reason: String },

    /// A `package.json` was read but is not valid JSON.
    #[error("Failed to parse {path}: {message}")]
    #[diagnostic(help("Check the manifest for JSON syntax errors"))]
    ManifestParse { path: String, message: String },

    /// The resolver configuration could not be loaded.
    #[error("Configuration error: {message}")]
    #[diagnostic(help("Check your nodestyle.toml for syntax errors"))]
    Config { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type StyleResult<T> = miette::Result<T>;
