use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SplitterError {
    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Filesystem errors
    #[error("Directory walker error: {0}")]
    Walkdir(#[from] walkdir::Error),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    // Configuration errors
    #[error("The {label} destination path must be a valid directory: {}", .path.display())]
    InvalidDestination { label: &'static str, path: PathBuf },

    // Metadata errors
    #[error("Exiftool error: {0}")]
    Exiftool(String),

    #[error("MediaInfo error for {path}: {reason}")]
    MediaInfo { path: PathBuf, reason: String },
}

/// Details about files that failed to copy.
#[derive(Debug)]
pub struct CopyFailures {
    pub failures: Vec<CopyFailure>,
}

#[derive(Debug)]
pub struct CopyFailure {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub error: std::io::Error,
}

impl std::fmt::Display for CopyFailures {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for failure in &self.failures {
            writeln!(
                f,
                "  {} -> {}: {}",
                failure.source.display(),
                failure.destination.display(),
                failure.error
            )?;
        }
        Ok(())
    }
}

impl CopyFailures {
    pub fn new() -> Self {
        Self { failures: Vec::new() }
    }

    pub fn add(&mut self, source: PathBuf, destination: PathBuf, error: std::io::Error) {
        self.failures.push(CopyFailure {
            source,
            destination,
            error,
        });
    }

    /// Move every failure from `other` into this collection, keeping order.
    pub fn extend(&mut self, other: CopyFailures) {
        self.failures.extend(other.failures);
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }
}

impl Default for CopyFailures {
    fn default() -> Self {
        Self::new()
    }
}

/// Result type for splitter operations.
pub type Result<T> = std::result::Result<T, SplitterError>;
