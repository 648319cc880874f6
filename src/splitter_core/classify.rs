use crate::splitter_core::category::Category;
use crate::splitter_core::metadata::MediaFile;
use std::collections::BTreeSet;

const APPLE_MAKER: &str = "Apple";
/// Matches both iPhone and iPad model names.
const DEVICE_FAMILY_MARKER: &str = "iP";
const ICC_VENDOR_MARKER: &str = "APPL";
const SCREENSHOT_COMMENT: &str = "Screenshot";
const LIVE_PHOTO_KEY_MARKER: &str = "livephoto";
const QUICKTIME_MAKE_KEY: &str = "comapplequicktimemake";
const PERFORMER_KEY: &str = "performer";
const SCREEN_RECORDING_AGENT: &str = "ReplayKitRecording";

const MAKER_TAGS: &[&str] = &["EXIF:LensMake", "EXIF:Make"];
const MODEL_TAGS: &[&str] = &["EXIF:LensModel", "EXIF:Model"];
const ICC_VENDOR_TAGS: &[&str] = &[
    "ICC_Profile:DeviceManufacturer",
    "ICC_Profile:PrimaryPlatform",
];
const USER_COMMENT_TAG: &str = "EXIF:UserComment";

/// A category predicate gated on a set of file extensions.
#[derive(Clone, Copy)]
pub struct Rule {
    pub category: Category,
    pub extensions: &'static [&'static str],
    pub predicate: fn(&MediaFile<'_>) -> bool,
}

impl Rule {
    /// Evaluate the rule. Metadata is only consulted once the extension
    /// has matched.
    pub fn matches(&self, file: &MediaFile<'_>) -> bool {
        self.extensions.contains(&file.extension()) && (self.predicate)(file)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("category", &self.category)
            .field("extensions", &self.extensions)
            .finish()
    }
}

fn is_camera_photo(file: &MediaFile<'_>) -> bool {
    file.image_tags().is_some_and(|tags| {
        tags.any_equals(MAKER_TAGS, APPLE_MAKER)
            && tags.any_contains(MODEL_TAGS, DEVICE_FAMILY_MARKER)
    })
}

fn is_camera_video(file: &MediaFile<'_>) -> bool {
    file.container_attributes().is_some_and(|attrs| {
        attrs.get(QUICKTIME_MAKE_KEY) == Some(APPLE_MAKER)
            && !attrs.has_key_containing(LIVE_PHOTO_KEY_MARKER)
    })
}

fn is_live_photo_video(file: &MediaFile<'_>) -> bool {
    file.container_attributes()
        .is_some_and(|attrs| attrs.has_key_containing(LIVE_PHOTO_KEY_MARKER))
}

fn is_screenshot(file: &MediaFile<'_>) -> bool {
    file.image_tags().is_some_and(|tags| {
        tags.any_contains(ICC_VENDOR_TAGS, ICC_VENDOR_MARKER)
            && tags.get(USER_COMMENT_TAG) == Some(SCREENSHOT_COMMENT)
    })
}

fn is_screen_recording(file: &MediaFile<'_>) -> bool {
    file.container_attributes()
        .is_some_and(|attrs| attrs.get(PERFORMER_KEY) == Some(SCREEN_RECORDING_AGENT))
}

/// The built-in rule for every category except Stray.
pub const DEFAULT_RULES: &[Rule] = &[
    Rule {
        category: Category::CameraPhoto,
        extensions: &["heic", "jpg"],
        predicate: is_camera_photo,
    },
    Rule {
        category: Category::LivePhotoVideo,
        extensions: &["mov"],
        predicate: is_live_photo_video,
    },
    Rule {
        category: Category::CameraVideo,
        extensions: &["mov"],
        predicate: is_camera_video,
    },
    Rule {
        category: Category::Screenshot,
        extensions: &["png"],
        predicate: is_screenshot,
    },
    Rule {
        category: Category::ScreenRecording,
        extensions: &["mp4"],
        predicate: is_screen_recording,
    },
];

/// Outcome of classifying a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// No enabled rule matched; the file is a stray.
    Unmatched,
    Matched(Category),
    /// Two or more rules matched.
    Ambiguous(BTreeSet<Category>),
}

impl Classification {
    pub fn from_matches(mut matches: BTreeSet<Category>) -> Self {
        match matches.len() {
            0 => Classification::Unmatched,
            1 => match matches.pop_first() {
                Some(category) => Classification::Matched(category),
                None => Classification::Unmatched,
            },
            _ => Classification::Ambiguous(matches),
        }
    }
}

/// Evaluates the enabled rules against files.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<Rule>,
}

impl Classifier {
    /// Build a classifier from the default rules, keeping only those whose
    /// category passes `enabled`.
    pub fn new(enabled: impl Fn(Category) -> bool) -> Self {
        Self::with_rules(DEFAULT_RULES.iter().copied(), enabled)
    }

    pub fn with_rules(
        rules: impl IntoIterator<Item = Rule>,
        enabled: impl Fn(Category) -> bool,
    ) -> Self {
        let rules: Vec<Rule> = rules
            .into_iter()
            .filter(|r| r.category != Category::Stray && enabled(r.category))
            .collect();
        Classifier { rules }
    }

    pub fn is_enabled(&self, category: Category) -> bool {
        self.rules.iter().any(|r| r.category == category)
    }

    /// Every category whose rule matches. All rules are evaluated so that
    /// ambiguity can be detected.
    pub fn matches(&self, file: &MediaFile<'_>) -> BTreeSet<Category> {
        self.rules
            .iter()
            .filter(|rule| rule.matches(file))
            .map(|rule| rule.category)
            .collect()
    }

    pub fn classify(&self, file: &MediaFile<'_>) -> Classification {
        Classification::from_matches(self.matches(file))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::splitter_core::metadata::{ContainerAttributes, ImageTags, MetadataProvider};
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    /// In-memory metadata keyed by path, recording every lookup.
    #[derive(Default)]
    pub(crate) struct FakeProvider {
        pub images: HashMap<PathBuf, ImageTags>,
        pub containers: HashMap<PathBuf, ContainerAttributes>,
        pub lookups: Mutex<Vec<PathBuf>>,
    }

    impl FakeProvider {
        pub fn with_image(mut self, path: &str, tags: &[(&str, &str)]) -> Self {
            self.images
                .insert(PathBuf::from(path), tags.iter().copied().collect());
            self
        }

        pub fn with_container(mut self, path: &str, attrs: &[(&str, &str)]) -> Self {
            self.containers
                .insert(PathBuf::from(path), attrs.iter().copied().collect());
            self
        }

        pub fn lookup_count(&self) -> usize {
            self.lookups.lock().unwrap().len()
        }
    }

    impl MetadataProvider for FakeProvider {
        fn image_tags(&self, path: &Path) -> Option<ImageTags> {
            self.lookups.lock().unwrap().push(path.to_path_buf());
            self.images.get(path).cloned()
        }

        fn container_attributes(&self, path: &Path) -> Option<ContainerAttributes> {
            self.lookups.lock().unwrap().push(path.to_path_buf());
            self.containers.get(path).cloned()
        }
    }

    fn classify(provider: &FakeProvider, path: &str) -> Classification {
        let classifier = Classifier::new(|_| true);
        classifier.classify(&MediaFile::new(PathBuf::from(path), provider))
    }

    #[test]
    fn test_camera_photo() {
        let provider = FakeProvider::default().with_image(
            "/src/IMG_0001.HEIC",
            &[("EXIF:Make", "Apple"), ("EXIF:Model", "iPhone 12")],
        );
        assert_eq!(
            classify(&provider, "/src/IMG_0001.HEIC"),
            Classification::Matched(Category::CameraPhoto)
        );
    }

    #[test]
    fn test_camera_photo_from_lens_tags() {
        let provider = FakeProvider::default().with_image(
            "/src/IMG_0003.jpg",
            &[
                ("EXIF:LensMake", "Apple"),
                ("EXIF:LensModel", "iPad Pro back camera 6mm f/1.8"),
            ],
        );
        assert_eq!(
            classify(&provider, "/src/IMG_0003.jpg"),
            Classification::Matched(Category::CameraPhoto)
        );
    }

    #[test]
    fn test_camera_photo_requires_device_family() {
        let provider = FakeProvider::default().with_image(
            "/src/DSC_0001.jpg",
            &[("EXIF:Make", "Apple"), ("EXIF:Model", "QuickTake 200")],
        );
        assert_eq!(classify(&provider, "/src/DSC_0001.jpg"), Classification::Unmatched);
    }

    #[test]
    fn test_live_photo_video_ignores_maker() {
        let provider = FakeProvider::default().with_container(
            "/src/IMG_0001.MOV",
            &[
                ("comapplequicktimemake", "Apple"),
                ("comapplequicktimelivephotoauto", "1"),
            ],
        );
        assert_eq!(
            classify(&provider, "/src/IMG_0001.MOV"),
            Classification::Matched(Category::LivePhotoVideo)
        );

        let provider = FakeProvider::default().with_container(
            "/src/IMG_0002.MOV",
            &[("comapplequicktimelivephotovitalityscore", "0.9")],
        );
        assert_eq!(
            classify(&provider, "/src/IMG_0002.MOV"),
            Classification::Matched(Category::LivePhotoVideo)
        );
    }

    #[test]
    fn test_camera_video() {
        let provider = FakeProvider::default()
            .with_container("/src/IMG_0004.MOV", &[("comapplequicktimemake", "Apple")]);
        assert_eq!(
            classify(&provider, "/src/IMG_0004.MOV"),
            Classification::Matched(Category::CameraVideo)
        );
    }

    #[test]
    fn test_screenshot_is_case_sensitive() {
        let provider = FakeProvider::default()
            .with_image(
                "/src/IMG_0005.PNG",
                &[
                    ("ICC_Profile:DeviceManufacturer", "APPL"),
                    ("EXIF:UserComment", "Screenshot"),
                ],
            )
            .with_image(
                "/src/IMG_0006.PNG",
                &[
                    ("ICC_Profile:PrimaryPlatform", "APPL"),
                    ("EXIF:UserComment", "screenshot"),
                ],
            );
        assert_eq!(
            classify(&provider, "/src/IMG_0005.PNG"),
            Classification::Matched(Category::Screenshot)
        );
        assert_eq!(classify(&provider, "/src/IMG_0006.PNG"), Classification::Unmatched);
    }

    #[test]
    fn test_screen_recording() {
        let provider = FakeProvider::default()
            .with_container("/src/RPReplay_Final1.MP4", &[("performer", "ReplayKitRecording")])
            .with_container("/src/clip.mp4", &[("performer", "Someone")]);
        assert_eq!(
            classify(&provider, "/src/RPReplay_Final1.MP4"),
            Classification::Matched(Category::ScreenRecording)
        );
        assert_eq!(classify(&provider, "/src/clip.mp4"), Classification::Unmatched);
    }

    #[test]
    fn test_metadata_unavailable_is_unmatched() {
        let provider = FakeProvider::default();
        assert_eq!(classify(&provider, "/src/broken.heic"), Classification::Unmatched);
        assert_eq!(classify(&provider, "/src/broken.mov"), Classification::Unmatched);
    }

    #[test]
    fn test_extension_mismatch_skips_metadata() {
        let provider = FakeProvider::default().with_image(
            "/src/notes.txt",
            &[("EXIF:Make", "Apple"), ("EXIF:Model", "iPhone 12")],
        );
        assert_eq!(classify(&provider, "/src/notes.txt"), Classification::Unmatched);
        assert_eq!(provider.lookup_count(), 0);
    }

    #[test]
    fn test_disabled_rules_are_not_evaluated() {
        let provider = FakeProvider::default()
            .with_container("/src/IMG_0004.MOV", &[("comapplequicktimemake", "Apple")]);
        let classifier = Classifier::new(|c| c == Category::CameraPhoto);
        let file = MediaFile::new(PathBuf::from("/src/IMG_0004.MOV"), &provider);

        assert_eq!(classifier.classify(&file), Classification::Unmatched);
        assert_eq!(provider.lookup_count(), 0);
        assert!(!classifier.is_enabled(Category::CameraVideo));
    }

    #[test]
    fn test_container_fetched_once_for_all_movie_rules() {
        let provider = FakeProvider::default()
            .with_container("/src/IMG_0004.MOV", &[("comapplequicktimemake", "Apple")]);
        classify(&provider, "/src/IMG_0004.MOV");
        assert_eq!(provider.lookup_count(), 1);
    }

    #[test]
    fn test_ambiguous_with_overlapping_rules() {
        fn always(_: &MediaFile<'_>) -> bool {
            true
        }
        let overlapping = Rule {
            category: Category::Screenshot,
            extensions: &["heic"],
            predicate: always,
        };
        let provider = FakeProvider::default().with_image(
            "/src/IMG_0001.HEIC",
            &[("EXIF:Make", "Apple"), ("EXIF:Model", "iPhone 12")],
        );
        let classifier = Classifier::with_rules(
            DEFAULT_RULES.iter().copied().chain([overlapping]),
            |_| true,
        );
        let file = MediaFile::new(PathBuf::from("/src/IMG_0001.HEIC"), &provider);

        assert_eq!(
            classifier.classify(&file),
            Classification::Ambiguous(BTreeSet::from([Category::CameraPhoto, Category::Screenshot]))
        );
    }

    #[test]
    fn test_rule_order_does_not_change_matches() {
        let provider = FakeProvider::default()
            .with_image(
                "/src/IMG_0001.HEIC",
                &[("EXIF:Make", "Apple"), ("EXIF:Model", "iPhone 12")],
            )
            .with_container("/src/IMG_0001.MOV", &[("comapplequicktimelivephoto", "1")]);

        let forward = Classifier::new(|_| true);
        let reversed = Classifier::with_rules(DEFAULT_RULES.iter().rev().copied(), |_| true);

        for path in ["/src/IMG_0001.HEIC", "/src/IMG_0001.MOV", "/src/other.png"] {
            let a = forward.matches(&MediaFile::new(PathBuf::from(path), &provider));
            let b = reversed.matches(&MediaFile::new(PathBuf::from(path), &provider));
            assert_eq!(a, b, "{}", path);
        }
    }

    #[test]
    fn test_stray_rule_is_never_enabled() {
        fn always(_: &MediaFile<'_>) -> bool {
            true
        }
        let stray = Rule {
            category: Category::Stray,
            extensions: &["txt"],
            predicate: always,
        };
        let classifier = Classifier::with_rules([stray], |_| true);
        assert!(!classifier.is_enabled(Category::Stray));
    }
}
