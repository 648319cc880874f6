pub mod category;
pub mod classify;
pub mod cli;
pub mod destinations;
pub mod error;
pub mod exif;
pub mod materialize;
pub mod mediainfo;
pub mod metadata;
pub mod report;
pub mod scan;
pub mod split;

pub use category::Category;
pub use classify::{Classification, Classifier, Rule, DEFAULT_RULES};
pub use cli::{Cli, OutputFormat};
pub use destinations::Destinations;
pub use error::{CopyFailures, SplitterError};
pub use materialize::{CopyOutcome, FileOps, LocalFs, Materializer};
pub use metadata::{ContainerAttributes, ImageTags, MediaFile, MetadataProvider, SystemMetadata};
pub use report::Report;
pub use scan::{ScanResult, scan_source};
pub use split::{SplitOptions, SplitOutcome, Splitter};
