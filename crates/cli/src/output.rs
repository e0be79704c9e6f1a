//! Writing the final schema document.

use anyhow::{Context, Result};
use graphsniper_pipeline::FinalSchema;
use std::io::Write;
use std::path::{Path, PathBuf};

/// `<dir>/<domain>_graphql_schema.json`
pub fn schema_path(dir: &Path, domain: &str) -> PathBuf {
    dir.join(format!("{domain}_graphql_schema.json"))
}

pub fn render(schema: &FinalSchema) -> Result<String> {
    serde_json::to_string_pretty(schema).context("Failed to serialize schema")
}

/// Write the schema to `path`, creating parent directories.
pub fn write_schema(schema: &FinalSchema, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let json = render(schema)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write to {}", path.display()))
}

pub fn print_schema(schema: &FinalSchema) -> Result<()> {
    let json = render(schema)?;
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(json.as_bytes())
        .and_then(|()| handle.write_all(b"\n"))
        .context("Failed to write to stdout")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_path() {
        assert_eq!(
            schema_path(Path::new("graphql_output"), "example.com"),
            PathBuf::from("graphql_output/example.com_graphql_schema.json")
        );
    }

    #[test]
    fn test_write_schema_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = schema_path(&dir.path().join("nested/out"), "a.com");
        let schema = FinalSchema {
            endpoint: Some("/graphql".to_string()),
            ..FinalSchema::default()
        };

        write_schema(&schema, &path).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["endpoint"], "/graphql");
        assert_eq!(written["queries"], serde_json::json!({}));
    }

    #[test]
    fn test_render_is_indented() {
        let json = render(&FinalSchema::default()).unwrap();
        assert!(json.contains("\n  \"endpoint\": null"));
    }
}
