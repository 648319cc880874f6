use crate::splitter_core::category::Category;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub copied: usize,
}

/// Final accounting of a run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    /// Copied counts for each category that has a destination, in report order.
    pub handled: Vec<CategoryCount>,
    pub ambiguous: usize,
    pub unmatched: usize,
    pub copy_failures: usize,
    pub dry_run: bool,
}

impl Report {
    pub fn copied(&self, category: Category) -> Option<usize> {
        self.handled
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.copied)
    }

    /// Render the human-readable summary block.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        if self.dry_run {
            out.push_str("[DRY RUN] ");
        }
        out.push_str("Handled:\n");
        for count in &self.handled {
            out.push_str(&format!("  {} {}\n", count.copied, count.category.report_label()));
        }
        out
    }

    pub fn render_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
