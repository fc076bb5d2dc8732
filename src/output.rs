//! CLI output formatting.
//!
//! Each report has a `format_*` function (returns `String` or `Vec<String>`)
//! for testability and, where it goes to stdout, a `print_*` wrapper. Format
//! functions are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Run summary (logged at the end of `run`)
//!
//! ```text
//! All files processed. Input 3, Output 2, All paths 5, Skipped 1
//! ```
//!
//! ## Check
//!
//! ```text
//! 001 a/b/photo.jpg
//!     300x500 → crop 300x400 at y=50
//!     Output: output/a/b/photo.jpg
//! 002 square.jpg
//!     300x300 → crop 300x300 at y=0 (clamped from 300x400)
//!     Output: output/square.jpg
//! 003 wide.jpg
//!     500x300 → skip (landscape)
//!
//! 3 files, 2 to crop, 1 landscape, 0 unreadable, 5 paths seen
//! ```

use crate::batch::{BatchSummary, CheckReport};
use crate::imaging::CropPlan;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Show `path` relative to `root` when possible.
fn relative_display(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// The end-of-run summary line.
///
/// Skipped and failed counts only appear when non-zero.
pub fn format_summary(summary: &BatchSummary) -> String {
    let mut line = format!(
        "All files processed. Input {}, Output {}, All paths {}",
        summary.input_files, summary.saved, summary.total_paths
    );
    if summary.skipped > 0 {
        line.push_str(&format!(", Skipped {}", summary.skipped));
    }
    if summary.failed > 0 {
        line.push_str(&format!(", Failed {}", summary.failed));
    }
    line
}

/// Format the dry-run listing produced by [`check`](crate::batch::check).
pub fn format_check_output(report: &CheckReport, input_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    let (mut to_crop, mut landscape, mut unreadable) = (0, 0, 0);

    for (i, entry) in report.entries.iter().enumerate() {
        lines.push(format!(
            "{} {}",
            format_index(i + 1),
            relative_display(&entry.source, input_root)
        ));

        match &entry.plan {
            Ok(CropPlan::Crop {
                params,
                rect,
                clamped,
            }) => {
                to_crop += 1;
                let region = params.region;
                let (width, height) = entry.dimensions.unwrap_or((region.width, region.height));
                let mut detail = format!(
                    "{}{}x{} → crop {}x{} at y={}",
                    indent(1),
                    width,
                    height,
                    region.width,
                    region.height,
                    region.y
                );
                if *clamped {
                    detail.push_str(&format!(
                        " (clamped from {}x{})",
                        rect.width(),
                        rect.height()
                    ));
                }
                lines.push(detail);
                lines.push(format!(
                    "{}Output: {}",
                    indent(1),
                    params.output.display()
                ));
            }
            Ok(CropPlan::SkipLandscape { width, height }) => {
                landscape += 1;
                lines.push(format!(
                    "{}{}x{} → skip (landscape)",
                    indent(1),
                    width,
                    height
                ));
            }
            Err(message) => {
                unreadable += 1;
                lines.push(format!("{}error: {}", indent(1), message));
            }
        }
    }

    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(
        "{} files, {} to crop, {} landscape, {} unreadable, {} paths seen",
        report.entries.len(),
        to_crop,
        landscape,
        unreadable,
        report.total_paths
    ));
    lines
}

pub fn print_check_output(report: &CheckReport, input_root: &Path) {
    for line in format_check_output(report, input_root) {
        println!("{}", line);
    }
}
