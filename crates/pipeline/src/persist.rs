//! Optional storage of fetched documents.

use std::path::{Path, PathBuf};

/// Side-channel storage for processed documents. Failures are the
/// implementation's problem and never reach the pipeline.
pub trait Persist: Send + Sync {
    fn persist(&self, name: &str, text: &str);
}

/// Drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl Persist for Discard {
    fn persist(&self, _name: &str, _text: &str) {}
}

/// Writes each document as a file inside one directory.
///
/// Documents with the same file name overwrite each other.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    dir: PathBuf,
}

impl DirectoryStore {
    /// Create the store, creating `dir` if needed.
    pub fn new(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Persist for DirectoryStore {
    fn persist(&self, name: &str, text: &str) {
        let path = self.dir.join(name);
        if let Err(e) = std::fs::write(&path, text) {
            tracing::warn!(path = %path.display(), error = %e, "Failed to save document");
        }
    }
}

/// File name under which a document URL is stored.
///
/// Uses the last segment of the raw URL path (`file.js` when there is none),
/// with every character outside `[A-Za-z0-9_.-]` replaced by `_`. The path
/// is not percent-encoded first, so `my app.js` becomes `my_app.js`.
#[must_use]
pub fn persist_name(document_url: &str) -> String {
    let path = url_path(document_url);
    let base = path.rsplit('/').next().unwrap_or_default();
    let base = if base.is_empty() { "file.js" } else { base };

    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// The path part of `document_url` exactly as written: no scheme or
/// authority, no query or fragment.
fn url_path(document_url: &str) -> &str {
    let before_query = document_url.split(['?', '#']).next().unwrap_or_default();
    let after_scheme = before_query
        .split_once("://")
        .map(|(_, rest)| rest)
        .or_else(|| before_query.strip_prefix("//"));
    match after_scheme {
        Some(rest) => rest.find('/').map_or("", |slash| &rest[slash..]),
        None => before_query,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persist_name_uses_last_segment() {
        assert_eq!(persist_name("https://cdn.example.com/static/js/main.abc123.js"), "main.abc123.js");
    }

    #[test]
    fn test_persist_name_ignores_query() {
        assert_eq!(persist_name("https://example.com/app.js?v=2#x"), "app.js");
    }

    #[test]
    fn test_persist_name_defaults_when_path_empty() {
        assert_eq!(persist_name("https://example.com/"), "file.js");
        assert_eq!(persist_name("https://example.com"), "file.js");
    }

    #[test]
    fn test_persist_name_replaces_unsafe_characters() {
        assert_eq!(persist_name("https://example.com/a/chunk%20one~2.js"), "chunk_20one_2.js");
    }

    #[test]
    fn test_persist_name_keeps_raw_space_as_single_underscore() {
        assert_eq!(persist_name("https://x.com/static/my app.js"), "my_app.js");
    }

    #[test]
    fn test_persist_name_replaces_non_ascii_character_once() {
        assert_eq!(persist_name("https://x.com/static/äpp.js"), "_pp.js");
    }

    #[test]
    fn test_persist_name_protocol_relative() {
        assert_eq!(persist_name("//cdn.example.com/js/vendor.js"), "vendor.js");
        assert_eq!(persist_name("//cdn.example.com"), "file.js");
    }

    #[test]
    fn test_persist_name_query_before_path() {
        assert_eq!(persist_name("https://example.com?next=/a/b.js"), "file.js");
    }

    #[test]
    fn test_persist_name_for_relative_input() {
        assert_eq!(persist_name("static/bundle.js?x=1"), "bundle.js");
    }

    #[test]
    fn test_directory_store_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirectoryStore::new(dir.path().join("js")).unwrap();

        store.persist("app.js", "query A { a }");

        let written = std::fs::read_to_string(store.dir().join("app.js")).unwrap();
        assert_eq!(written, "query A { a }");
    }
}
