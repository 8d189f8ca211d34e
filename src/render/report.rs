//! Manifest JSON generation.

use super::pipeline::RenderOutcome;
use crate::domain::RenderConfig;
use crate::utils::display_path;
use anyhow::Result;
use chrono::Utc;
use serde_json::{json, Map, Value};
use std::path::Path;

pub const MANIFEST_SCHEMA_VERSION: &str = "1.0.0";
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// Write `manifest.json` describing one rendered document.
pub fn write_manifest(
    manifest_path: &Path,
    source: &Path,
    encoding: &str,
    config: &RenderConfig,
    outcome: &RenderOutcome,
    include_timestamp: bool,
) -> Result<()> {
    let pages = outcome
        .pages
        .iter()
        .enumerate()
        .map(|(index, path)| {
            let lines_per_page = config.lines_per_page().get();
            let start_line = index * lines_per_page + 1;
            let end_line = ((index + 1) * lines_per_page).min(outcome.line_count.max(start_line));
            json!({
                "file": path.file_name().map(|n| n.to_string_lossy().into_owned()),
                "start_line": start_line,
                "end_line": end_line,
            })
        })
        .collect::<Vec<_>>();

    let mut manifest = Map::new();
    manifest
        .insert("schema_version".to_string(), Value::String(MANIFEST_SCHEMA_VERSION.to_string()));
    if include_timestamp {
        manifest.insert(
            "generated_at".to_string(),
            Value::String(Utc::now().format("%Y-%m-%dT%H:%M:%S+00:00").to_string()),
        );
    }
    manifest.insert("source".to_string(), Value::String(display_path(source)));
    manifest.insert("encoding".to_string(), Value::String(encoding.to_string()));
    manifest.insert("line_count".to_string(), json!(outcome.line_count));
    manifest.insert("config".to_string(), serde_json::to_value(config)?);
    manifest.insert("pages".to_string(), Value::Array(pages));

    if let Some(parent) = manifest_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(manifest_path, serde_json::to_string_pretty(&Value::Object(manifest))?)?;
    Ok(())
}
