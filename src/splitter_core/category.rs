use serde::Serialize;

/// The fixed set of classification outcomes.
///
/// Variant order is the order categories are materialized and reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    CameraPhoto,
    LivePhotoVideo,
    CameraVideo,
    Screenshot,
    ScreenRecording,
    Stray,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::CameraPhoto,
        Category::LivePhotoVideo,
        Category::CameraVideo,
        Category::Screenshot,
        Category::ScreenRecording,
        Category::Stray,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::CameraPhoto => "camera_photo",
            Category::LivePhotoVideo => "live_photo_video",
            Category::CameraVideo => "camera_video",
            Category::Screenshot => "screenshot",
            Category::ScreenRecording => "screen_recording",
            Category::Stray => "stray",
        }
    }

    /// Plural label used in the final report.
    pub fn report_label(&self) -> &'static str {
        match self {
            Category::CameraPhoto => "photos",
            Category::LivePhotoVideo => "live photo videos",
            Category::CameraVideo => "videos",
            Category::Screenshot => "screenshots",
            Category::ScreenRecording => "screen recordings",
            Category::Stray => "strays",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
