use crate::splitter_core::error::{Result, SplitterError};
use crate::splitter_core::metadata::ContainerAttributes;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;
use std::process::Command;

#[derive(Deserialize, Debug)]
struct MediaInfoOutput {
    media: Option<MediaInfoMedia>,
}

#[derive(Deserialize, Debug)]
struct MediaInfoMedia {
    #[serde(default)]
    track: Vec<Map<String, Value>>,
}

/// Lowercase a mediainfo attribute name and strip everything that is not
/// an ASCII letter or digit, so `com.apple.quicktime.make`,
/// `com_apple_quicktime_make` and `comapplequicktimemake` all agree.
pub fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn flatten_into(attrs: &mut Vec<(String, String)>, object: &Map<String, Value>) {
    for (key, value) in object {
        match value {
            Value::Object(nested) => flatten_into(attrs, nested),
            Value::String(s) => attrs.push((normalize_key(key), s.clone())),
            Value::Number(n) => attrs.push((normalize_key(key), n.to_string())),
            Value::Bool(b) => attrs.push((normalize_key(key), b.to_string())),
            _ => {}
        }
    }
}

/// Parse `mediainfo --Output=JSON` output into the attributes of the General
/// track. Returns `None` when the output has no General track.
pub fn parse_general_track(json: &str) -> serde_json::Result<Option<ContainerAttributes>> {
    let output: MediaInfoOutput = serde_json::from_str(json)?;

    let general = output.media.and_then(|media| {
        media
            .track
            .into_iter()
            .find(|track| track.get("@type").and_then(Value::as_str) == Some("General"))
    });

    Ok(general.map(|track| {
        let mut attrs = Vec::new();
        flatten_into(&mut attrs, &track);
        attrs
            .into_iter()
            .filter(|(key, _)| key != "type")
            .collect()
    }))
}

/// Read the General track attributes of a movie container with mediainfo.
pub fn read_container_attributes(path: &Path) -> Result<ContainerAttributes> {
    let output = Command::new("mediainfo")
        .arg("--Output=JSON")
        .arg(path)
        .output()
        .map_err(|e| SplitterError::MediaInfo {
            path: path.to_path_buf(),
            reason: format!("failed to run mediainfo: {}", e),
        })?;

    if !output.status.success() {
        return Err(SplitterError::MediaInfo {
            path: path.to_path_buf(),
            reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed = parse_general_track(&stdout).map_err(|e| SplitterError::MediaInfo {
        path: path.to_path_buf(),
        reason: format!("unparseable output: {}", e),
    })?;

    parsed.ok_or_else(|| SplitterError::MediaInfo {
        path: path.to_path_buf(),
        reason: "no General track".to_string(),
    })
}

/// Check if mediainfo is available on the system.
pub fn mediainfo_available() -> bool {
    Command::new("mediainfo")
        .arg("--Version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}
