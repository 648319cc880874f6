use crate::splitter_core::category::Category;
use crate::splitter_core::classify::{Classification, Classifier};
use crate::splitter_core::error::{Result, SplitterError};
use crate::splitter_core::metadata::{MediaFile, MetadataProvider};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A file that matched more than one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguousFile {
    pub path: PathBuf,
    pub categories: BTreeSet<Category>,
}

/// Result of scanning a source directory.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Sorted paths per category. Only categories being collected have an entry.
    pub buckets: BTreeMap<Category, Vec<PathBuf>>,
    /// Files matching two or more categories, sorted by path.
    pub ambiguous: Vec<AmbiguousFile>,
    /// Files matching no category, sorted by path, whether or not they were
    /// routed to the stray bucket.
    pub unmatched: Vec<PathBuf>,
    pub files_scanned: usize,
}

impl ScanResult {
    pub fn bucket(&self, category: Category) -> &[PathBuf] {
        self.buckets.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// One line per ambiguous file, then (when `verbose`) one line per
    /// unmatched file, each group in path order.
    pub fn diagnostics(&self, verbose: bool) -> Vec<String> {
        let mut lines: Vec<String> = self
            .ambiguous
            .iter()
            .map(|file| {
                let categories: Vec<&str> =
                    file.categories.iter().map(Category::as_str).collect();
                format!(
                    "ERROR: Found file \"{}\" matches more than one possible type ({}).",
                    file.path.display(),
                    categories.join(", ")
                )
            })
            .collect();

        if verbose {
            lines.extend(
                self.unmatched
                    .iter()
                    .map(|path| format!("No match found for: {}", path.display())),
            );
        }

        lines
    }
}

/// List every regular file below `source`, including symlinks that point at
/// regular files. Symlinked directories are not descended into. Walk errors
/// and dangling links are logged and skipped.
pub fn discover_files(source: &Path) -> Result<Vec<PathBuf>> {
    if !source.is_dir() {
        return Err(SplitterError::NotADirectory(source.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(source) {
        match entry {
            Ok(entry) if entry.file_type().is_file() => files.push(entry.into_path()),
            Ok(entry) if entry.path_is_symlink() => {
                if entry.path().is_file() {
                    files.push(entry.into_path());
                } else if !entry.path().exists() {
                    log::warn!("Skipping dangling symlink {}", entry.path().display());
                } else {
                    log::debug!("Not following symlinked directory {}", entry.path().display());
                }
            }
            Ok(_) => {}
            Err(e) => log::warn!("Skipping unreadable entry: {}", e),
        }
    }

    Ok(files)
}

/// Classify files on the rayon pool. Output is sorted by path.
pub fn classify_files(
    files: Vec<PathBuf>,
    classifier: &Classifier,
    provider: &dyn MetadataProvider,
    bar: &ProgressBar,
) -> Vec<(PathBuf, Classification)> {
    let mut classified: Vec<(PathBuf, Classification)> = files
        .into_par_iter()
        .map(|path| {
            let file = MediaFile::new(path, provider);
            let classification = classifier.classify(&file);
            bar.inc(1);
            (file.into_path(), classification)
        })
        .collect();

    classified.sort_by(|a, b| a.0.cmp(&b.0));
    classified
}

/// Route classified files into buckets. Categories without a classifier rule
/// get no bucket; unmatched files go to the stray bucket only when
/// `collect_strays` is set. Ambiguous files land nowhere.
pub fn partition(
    classified: Vec<(PathBuf, Classification)>,
    classifier: &Classifier,
    collect_strays: bool,
) -> ScanResult {
    let mut result = ScanResult {
        files_scanned: classified.len(),
        ..Default::default()
    };

    for category in Category::ALL {
        if classifier.is_enabled(category) || (category == Category::Stray && collect_strays) {
            result.buckets.insert(category, Vec::new());
        }
    }

    for (path, classification) in classified {
        match classification {
            Classification::Matched(category) => match result.buckets.get_mut(&category) {
                Some(bucket) => bucket.push(path),
                None => log::warn!("No bucket for {} ({})", path.display(), category),
            },
            Classification::Unmatched => {
                if collect_strays {
                    if let Some(bucket) = result.buckets.get_mut(&Category::Stray) {
                        bucket.push(path.clone());
                    }
                }
                result.unmatched.push(path);
            }
            Classification::Ambiguous(categories) => {
                result.ambiguous.push(AmbiguousFile { path, categories });
            }
        }
    }

    for bucket in result.buckets.values_mut() {
        bucket.sort();
    }
    result.ambiguous.sort_by(|a, b| a.path.cmp(&b.path));
    result.unmatched.sort();

    result
}

/// Walk `source`, classify every file and partition the results.
pub fn scan_source(
    source: &Path,
    classifier: &Classifier,
    provider: &dyn MetadataProvider,
    collect_strays: bool,
) -> Result<ScanResult> {
    log::info!("Scanning source directory {}", source.display());

    let files = discover_files(source)?;

    let bar_style = ProgressStyle::default_bar()
        .template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    let bar = ProgressBar::new(files.len() as u64).with_style(bar_style);
    bar.set_message("Classifying files");

    let classified = classify_files(files, classifier, provider, &bar);
    bar.finish_with_message("Classification complete");

    let result = partition(classified, classifier, collect_strays);

    log::info!(
        "Scanned {} files: {} ambiguous, {} unmatched",
        result.files_scanned,
        result.ambiguous.len(),
        result.unmatched.len()
    );

    Ok(result)
}
