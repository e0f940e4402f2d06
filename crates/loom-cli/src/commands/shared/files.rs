use std::path::Path;

use anyhow::Context;
use loom_core::entities::FileSet;

/// Read a file set from a JSON object mapping path to content.
pub fn read_file_set(path: &str) -> anyhow::Result<FileSet> {
    let raw = std::fs::read_to_string(Path::new(path))
        .with_context(|| format!("failed to read file set from {path}"))?;
    parse_file_set(&raw).with_context(|| format!("invalid file set in {path}"))
}

fn parse_file_set(raw: &str) -> anyhow::Result<FileSet> {
    let files: FileSet = serde_json::from_str(raw)
        .context("expected a JSON object of path -> content strings")?;
    if let Some(empty) = files.keys().find(|p| p.trim().is_empty()) {
        anyhow::bail!("file paths must not be empty (got {empty:?})");
    }
    Ok(files)
}
