use crate::splitter_core::category::Category;
use crate::splitter_core::error::{Result, SplitterError};
use std::path::{Path, PathBuf};

/// Where each category is copied to. A category without a destination is
/// neither classified nor materialized.
#[derive(Debug, Clone, Default)]
pub struct Destinations {
    pub photo: Option<PathBuf>,
    /// Live photo videos go next to their photos unless this is set.
    pub live_photo: Option<PathBuf>,
    pub video: Option<PathBuf>,
    pub screenshot: Option<PathBuf>,
    pub screen_recording: Option<PathBuf>,
    pub stray: Option<PathBuf>,
}

impl Destinations {
    pub fn for_category(&self, category: Category) -> Option<&Path> {
        let dest = match category {
            Category::CameraPhoto => self.photo.as_ref(),
            Category::LivePhotoVideo => self.live_photo.as_ref().or(self.photo.as_ref()),
            Category::CameraVideo => self.video.as_ref(),
            Category::Screenshot => self.screenshot.as_ref(),
            Category::ScreenRecording => self.screen_recording.as_ref(),
            Category::Stray => self.stray.as_ref(),
        };
        dest.map(PathBuf::as_path)
    }

    pub fn is_configured(&self, category: Category) -> bool {
        self.for_category(category).is_some()
    }

    /// Categories with a destination, in report order.
    pub fn active_categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| self.is_configured(*c))
            .collect()
    }

    /// Ensure every configured destination is an existing directory.
    pub fn validate(&self) -> Result<()> {
        let flags = [
            ("photo", &self.photo),
            ("live photo", &self.live_photo),
            ("video", &self.video),
            ("screenshot", &self.screenshot),
            ("screen recording", &self.screen_recording),
            ("stray", &self.stray),
        ];

        for (label, dest) in flags {
            if let Some(path) = dest {
                if !path.is_dir() {
                    return Err(SplitterError::InvalidDestination {
                        label,
                        path: path.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}
