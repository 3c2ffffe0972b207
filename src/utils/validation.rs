use anyhow::{Result, anyhow};
use std::path::Path;

/// Reduce a client-supplied file name to a safe object key.
///
/// Any path component is stripped, and characters that are reserved on common
/// filesystems or ambiguous in URLs are replaced with underscores.
pub fn sanitize_filename(filename: &str) -> Result<String> {
    // Get only the filename component (remove any path)
    let name = Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");

    if name.is_empty() {
        return Err(anyhow!("Filename cannot be empty"));
    }

    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        tracing::warn!("Path traversal attempt detected: {}", filename);
    }

    let sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_control()
                || c == '/'
                || c == '\\'
                || c == ':'
                || c == '*'
                || c == '?'
                || c == '"'
                || c == '<'
                || c == '>'
                || c == '|'
                || c == ';'
            {
                '_'
            } else {
                c
            }
        })
        .collect();

    if sanitized.chars().all(|c| c == '_' || c == '.') {
        return Err(anyhow!("Filename contains no usable characters"));
    }

    Ok(sanitized)
}
