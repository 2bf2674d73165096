use std::path::Path;

use crate::errors::StyleError;

/// Read a manifest file as raw bytes.
///
/// A missing, unreadable or empty file is reported as
/// [`StyleError::ManifestNotFound`]. The content is not decoded here, so
/// bytes that are not valid UTF-8 surface later as a parse failure.
pub fn read_manifest_bytes(path: &Path) -> Result<Vec<u8>, StyleError> {
    let content = std::fs::read(path).map_err(|e| StyleError::ManifestNotFound {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    if content.is_empty() {
        return Err(StyleError::ManifestNotFound {
            path: path.display().to_string(),
            reason: "file is empty".to_string(),
        });
    }
    Ok(content)
}

/// Join path segments with `/` and normalize the result.
///
/// Empty segments are skipped. Normalization follows POSIX rules: `.`
/// segments and repeated separators are dropped, `..` removes the preceding
/// segment. A result that normalizes to nothing becomes `"."`.
pub fn join_normalized(segments: &[&str]) -> String {
    let joined = segments
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("/");
    if joined.is_empty() {
        return ".".to_string();
    }
    normalize(&joined)
}

/// Normalize a `/`-separated path without touching the filesystem.
pub fn normalize(path: &str) -> String {
    let absolute = path.starts_with('/');
    let trailing = path.len() > 1 && path.ends_with('/');

    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|p| *p != "..") {
                    parts.pop();
                } else if !absolute {
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }

    let mut out = parts.join("/");
    if trailing && !out.is_empty() {
        out.push('/');
    }
    match (absolute, out.is_empty()) {
        (true, _) => format!("/{out}"),
        (false, true) => ".".to_string(),
        (false, false) => out,
    }
}

/// Returns `true` if a `/`-separated path string is absolute.
pub fn is_absolute(path: &str) -> bool {
    path.starts_with('/')
}
