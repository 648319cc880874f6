use crate::splitter_core::error::{Result, SplitterError};
use crate::splitter_core::metadata::ImageTags;
use exiftool::ExifTool;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Group-qualified tag names (`EXIF:Make`) and raw, unconverted values
/// (`APPL` rather than `Apple Computer Inc.`).
const EXIFTOOL_ARGS: &[&str] = &["-G", "-n"];

/// Helper to render a tag value as a string (handles strings, numbers and lists)
fn value_to_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(value_to_string).collect();
            Some(parts.join(", "))
        }
        _ => None,
    }
}

/// Convert raw exiftool JSON output into tags, dropping the bookkeeping
/// `SourceFile` entry and values that have no textual form.
fn tags_from_raw(raw: HashMap<String, Value>) -> ImageTags {
    raw.into_iter()
        .filter(|(key, _)| key != "SourceFile")
        .filter_map(|(key, value)| value_to_string(&value).map(|v| (key, v)))
        .collect()
}

/// Read every tag exiftool can find in an image file.
pub fn read_image_tags(exiftool: &mut ExifTool, path: &Path) -> Result<ImageTags> {
    let raw: HashMap<String, Value> = exiftool
        .read_metadata(path, EXIFTOOL_ARGS)
        .map_err(|e| SplitterError::Exiftool(e.to_string()))?;

    let tags = tags_from_raw(raw);
    log::debug!("Read {} image tags from {}", tags.len(), path.display());
    Ok(tags)
}

/// Check if exiftool is available on the system.
pub fn exiftool_available() -> bool {
    std::process::Command::new("exiftool")
        .arg("-ver")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}
