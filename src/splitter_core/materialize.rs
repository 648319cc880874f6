use crate::splitter_core::error::CopyFailures;
use filetime::FileTime;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Filesystem operations the materializer needs.
pub trait FileOps: Sync {
    fn exists(&self, path: &Path) -> bool;

    /// True when both paths name the same file on disk.
    fn same_file(&self, a: &Path, b: &Path) -> bool;

    /// Copy `from` to `to`, keeping permission bits and access/modification times.
    fn copy_with_metadata(&self, from: &Path, to: &Path) -> io::Result<()>;
}

/// The local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl FileOps for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn same_file(&self, a: &Path, b: &Path) -> bool {
        match (fs::canonicalize(a), fs::canonicalize(b)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }

    fn copy_with_metadata(&self, from: &Path, to: &Path) -> io::Result<()> {
        // fs::copy carries permission bits over
        fs::copy(from, to)?;
        let metadata = fs::metadata(from)?;
        let mtime = FileTime::from_last_modification_time(&metadata);
        let atime = FileTime::from_last_access_time(&metadata);
        filetime::set_file_times(to, atime, mtime)
    }
}

/// What happened to a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    SkippedExisting,
}

/// Per-bucket accounting.
#[derive(Debug, Default)]
pub struct MaterializeResult {
    pub copied: usize,
    pub skipped: usize,
    pub failures: CopyFailures,
    /// Verbose per-file lines (`Copying ...`, `Skipping ...`), in bucket order.
    pub notes: Vec<String>,
}

/// Copies buckets into destination directories without overwriting unless asked.
pub struct Materializer<'a> {
    ops: &'a dyn FileOps,
    overwrite: bool,
    verbose: bool,
    dry_run: bool,
    /// Targets written (or planned, in a dry run) during this run.
    claimed: HashSet<PathBuf>,
    notes: Vec<String>,
}

impl<'a> Materializer<'a> {
    pub fn new(ops: &'a dyn FileOps, overwrite: bool, verbose: bool, dry_run: bool) -> Self {
        Materializer {
            ops,
            overwrite,
            verbose,
            dry_run,
            claimed: HashSet::new(),
            notes: Vec::new(),
        }
    }

    fn target_exists(&self, target: &Path) -> bool {
        (self.dry_run && self.claimed.contains(target)) || self.ops.exists(target)
    }

    fn note(&mut self, line: String) {
        if self.verbose {
            self.notes.push(line);
        }
    }

    /// Copy one file into `dest_dir` under its base name. A file is never
    /// copied onto itself, even with overwrite on.
    pub fn materialize_one(
        &mut self,
        source: &Path,
        dest_dir: &Path,
    ) -> io::Result<CopyOutcome> {
        let Some(name) = source.file_name() else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "source path has no file name",
            ));
        };
        let target = dest_dir.join(name);

        if !self.overwrite && self.target_exists(&target) {
            self.note(format!("Skipping {}", source.display()));
            log::debug!("Skipping {} ({} exists)", source.display(), target.display());
            return Ok(CopyOutcome::SkippedExisting);
        }

        if self.ops.same_file(source, &target) {
            self.note(format!("Skipping {}", source.display()));
            log::debug!("Skipping {} (already at {})", source.display(), target.display());
            return Ok(CopyOutcome::SkippedExisting);
        }

        self.note(format!("Copying {} to {}", source.display(), target.display()));

        if !self.dry_run {
            self.ops.copy_with_metadata(source, &target)?;
        }
        self.claimed.insert(target);

        Ok(CopyOutcome::Copied)
    }

    /// Copy every path of a bucket, in order, into `dest_dir`. Failures are
    /// collected and do not stop the remaining copies.
    pub fn materialize(&mut self, bucket: &[PathBuf], dest_dir: &Path) -> MaterializeResult {
        let mut result = MaterializeResult::default();

        for source in bucket {
            match self.materialize_one(source, dest_dir) {
                Ok(CopyOutcome::Copied) => result.copied += 1,
                Ok(CopyOutcome::SkippedExisting) => result.skipped += 1,
                Err(e) => {
                    let target = source
                        .file_name()
                        .map(|name| dest_dir.join(name))
                        .unwrap_or_else(|| dest_dir.to_path_buf());
                    log::error!("Failed to copy {}: {}", source.display(), e);
                    result.failures.add(source.clone(), target, e);
                }
            }
        }

        result.notes = std::mem::take(&mut self.notes);
        result
    }
}
