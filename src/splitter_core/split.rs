use crate::splitter_core::category::Category;
use crate::splitter_core::classify::Classifier;
use crate::splitter_core::destinations::Destinations;
use crate::splitter_core::error::{CopyFailures, Result};
use crate::splitter_core::materialize::{FileOps, Materializer};
use crate::splitter_core::metadata::MetadataProvider;
use crate::splitter_core::report::{CategoryCount, Report};
use crate::splitter_core::scan::scan_source;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
pub struct SplitOptions {
    pub overwrite: bool,
    pub verbose: bool,
    pub dry_run: bool,
}

/// Everything a run produced.
#[derive(Debug)]
pub struct SplitOutcome {
    pub report: Report,
    pub failures: CopyFailures,
    /// Per-file diagnostic lines: scan findings first, then copy notes.
    pub diagnostics: Vec<String>,
}

/// Scan, classify and materialize a source directory.
pub struct Splitter<'a> {
    destinations: Destinations,
    options: SplitOptions,
    provider: &'a dyn MetadataProvider,
    ops: &'a dyn FileOps,
}

impl<'a> Splitter<'a> {
    pub fn new(
        destinations: Destinations,
        options: SplitOptions,
        provider: &'a dyn MetadataProvider,
        ops: &'a dyn FileOps,
    ) -> Self {
        Splitter {
            destinations,
            options,
            provider,
            ops,
        }
    }

    pub fn run(&self, source: &Path) -> Result<SplitOutcome> {
        self.destinations.validate()?;

        // Phase 1: classify
        let classifier = Classifier::new(|c| self.destinations.is_configured(c));
        let scan = scan_source(
            source,
            &classifier,
            self.provider,
            self.destinations.is_configured(Category::Stray),
        )?;
        let mut diagnostics = scan.diagnostics(self.options.verbose);

        // Phase 2: copy, category by category in report order
        log::info!(
            "Materializing {} categories",
            self.destinations.active_categories().len()
        );

        let mut materializer = Materializer::new(
            self.ops,
            self.options.overwrite,
            self.options.verbose,
            self.options.dry_run,
        );
        let mut failures = CopyFailures::new();
        let mut handled = Vec::new();

        for category in self.destinations.active_categories() {
            let Some(dest_dir) = self.destinations.for_category(category) else {
                continue;
            };
            let result = materializer.materialize(scan.bucket(category), dest_dir);
            log::info!(
                "{}: {} copied, {} skipped, {} failed",
                category,
                result.copied,
                result.skipped,
                result.failures.len()
            );
            handled.push(CategoryCount {
                category,
                copied: result.copied,
            });
            failures.extend(result.failures);
            diagnostics.extend(result.notes);
        }

        let report = Report {
            handled,
            ambiguous: scan.ambiguous.len(),
            unmatched: scan.unmatched.len(),
            copy_failures: failures.len(),
            dry_run: self.options.dry_run,
        };

        Ok(SplitOutcome {
            report,
            failures,
            diagnostics,
        })
    }
}
