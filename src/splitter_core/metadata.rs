use crate::splitter_core::exif::read_image_tags;
use crate::splitter_core::mediainfo::read_container_attributes;
use exiftool::ExifTool;
use std::cell::{OnceCell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

thread_local! {
    static EXIFTOOL: RefCell<Option<ExifTool>> = const { RefCell::new(None) };
}

/// EXIF-style tags read from an image container, keyed by group-qualified
/// tag name (e.g. `EXIF:Make`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageTags(HashMap<String, String>);

impl ImageTags {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// True if any of `keys` holds exactly `expected`.
    pub fn any_equals(&self, keys: &[&str], expected: &str) -> bool {
        keys.iter().any(|k| self.get(k) == Some(expected))
    }

    /// True if any of `keys` holds a value containing `marker`.
    pub fn any_contains(&self, keys: &[&str], marker: &str) -> bool {
        keys.iter()
            .filter_map(|k| self.get(k))
            .any(|v| v.contains(marker))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ImageTags {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        ImageTags(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Track-level attributes of a movie container. Keys are lowercase and
/// vendor-specific, so lookups by substring over keys are supported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerAttributes(BTreeMap<String, String>);

impl ContainerAttributes {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// First key containing `fragment`, in key order.
    pub fn key_containing(&self, fragment: &str) -> Option<&str> {
        self.0.keys().map(String::as_str).find(|k| k.contains(fragment))
    }

    pub fn has_key_containing(&self, fragment: &str) -> bool {
        self.key_containing(fragment).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ContainerAttributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        ContainerAttributes(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Source of per-file metadata. `None` means the metadata is unavailable
/// (unreadable file, missing tool, unsupported container).
pub trait MetadataProvider: Sync {
    fn image_tags(&self, path: &Path) -> Option<ImageTags>;
    fn container_attributes(&self, path: &Path) -> Option<ContainerAttributes>;
}

/// Metadata read with the `exiftool` and `mediainfo` command line tools.
///
/// Each worker thread lazily starts its own exiftool process.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemMetadata;

impl MetadataProvider for SystemMetadata {
    fn image_tags(&self, path: &Path) -> Option<ImageTags> {
        EXIFTOOL.with(|cell| {
            let mut exiftool_opt = cell.borrow_mut();
            if exiftool_opt.is_none() {
                match ExifTool::new() {
                    Ok(exiftool) => *exiftool_opt = Some(exiftool),
                    Err(e) => log::debug!("ExifTool not available: {}", e),
                }
            }
            let exiftool = exiftool_opt.as_mut()?;
            match read_image_tags(exiftool, path) {
                Ok(tags) => Some(tags),
                Err(e) => {
                    log::debug!("No image tags for {}: {}", path.display(), e);
                    None
                }
            }
        })
    }

    fn container_attributes(&self, path: &Path) -> Option<ContainerAttributes> {
        match read_container_attributes(path) {
            Ok(attrs) => Some(attrs),
            Err(e) => {
                log::debug!("No container attributes for {}: {}", path.display(), e);
                None
            }
        }
    }
}

/// A discovered file being classified. Metadata of each kind is fetched at
/// most once and cached for the lifetime of the value.
pub struct MediaFile<'p> {
    path: PathBuf,
    extension: String,
    provider: &'p dyn MetadataProvider,
    image_tags: OnceCell<Option<ImageTags>>,
    container: OnceCell<Option<ContainerAttributes>>,
}

impl<'p> MediaFile<'p> {
    pub fn new(path: PathBuf, provider: &'p dyn MetadataProvider) -> Self {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        MediaFile {
            path,
            extension,
            provider,
            image_tags: OnceCell::new(),
            container: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }

    /// Lowercase extension without the dot; empty when the file has none.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn image_tags(&self) -> Option<&ImageTags> {
        self.image_tags
            .get_or_init(|| self.provider.image_tags(&self.path))
            .as_ref()
    }

    pub fn container_attributes(&self) -> Option<&ContainerAttributes> {
        self.container
            .get_or_init(|| self.provider.container_attributes(&self.path))
            .as_ref()
    }
}
