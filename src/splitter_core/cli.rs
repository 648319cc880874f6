use crate::splitter_core::destinations::Destinations;
use crate::splitter_core::split::SplitOptions;
use clap::{Parser, ValueEnum};
use simplelog::LevelFilter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Sort iOS media exports into photos, videos, screenshots and screen recordings"
)]
pub struct Cli {
    /// Directory that contains all of the media files from an iOS device
    #[arg(long, required = true)]
    pub source: PathBuf,

    /// Where to copy camera photos (and live photo videos, unless --live-photo-dest is set)
    #[arg(long, alias = "photo_dest")]
    pub photo_dest: Option<PathBuf>,

    /// Where to copy live photo videos (defaults to --photo-dest)
    #[arg(long, alias = "live_photo_dest")]
    pub live_photo_dest: Option<PathBuf>,

    /// Where to copy camera videos
    #[arg(long, alias = "video_dest")]
    pub video_dest: Option<PathBuf>,

    /// Where to copy screenshots
    #[arg(long, alias = "screenshot_dest")]
    pub screenshot_dest: Option<PathBuf>,

    /// Where to copy screen recordings
    #[arg(long, alias = "screen_recording_dest")]
    pub screen_recording_dest: Option<PathBuf>,

    /// Where to copy files that don't fit into other categories
    #[arg(long, alias = "stray_dest")]
    pub stray_dest: Option<PathBuf>,

    /// Overwrite files if they already exist in a destination
    #[arg(long)]
    pub overwrite: bool,

    /// Print every copy, skip and unmatched file
    #[arg(short, long)]
    pub verbose: bool,

    /// Show what would be copied without making changes
    #[arg(long)]
    pub dry_run: bool,

    /// Output format for the final report
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Enable file logging to splitter.log
    #[arg(long = "log")]
    pub log: bool,

    /// Log level for file logging (debug, info, warn, error)
    #[arg(long, default_value_t = LevelFilter::Debug)]
    pub log_level: LevelFilter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text summary
    Text,
    /// JSON output
    Json,
}

impl Cli {
    pub fn destinations(&self) -> Destinations {
        Destinations {
            photo: self.photo_dest.clone(),
            live_photo: self.live_photo_dest.clone(),
            video: self.video_dest.clone(),
            screenshot: self.screenshot_dest.clone(),
            screen_recording: self.screen_recording_dest.clone(),
            stray: self.stray_dest.clone(),
        }
    }

    pub fn options(&self) -> SplitOptions {
        SplitOptions {
            overwrite: self.overwrite,
            verbose: self.verbose,
            dry_run: self.dry_run,
        }
    }
}
