//! Source file discovery.
//!
//! Walks the input root recursively with [`walkdir`] and keeps every entry
//! that is a regular file (symlinks to files included). The walk is
//! forgiving by contract:
//!
//! - A missing input root, or one that is not a directory, yields an empty
//!   [`Discovery`] rather than an error. A run over nothing is a valid run.
//! - Entries that cannot be read mid-walk are logged and skipped.
//! - When the output root lives inside the input root, that subtree is pruned
//!   so a second run never feeds its own results back in.
//!
//! Files come back deduplicated and sorted, which makes logs and reports
//! reproducible across platforms whose directory order differs.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Files found under an input root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    /// Unique regular files, sorted.
    pub files: Vec<PathBuf>,
    /// Every entry the walk yielded below the root, files or not.
    pub total_entries: usize,
}

impl Discovery {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Recursively discover regular files under `input_root`.
///
/// `exclude` names a directory to prune from the walk; it only takes effect
/// when it is strictly inside `input_root`.
pub fn discover(input_root: &Path, exclude: Option<&Path>) -> Discovery {
    if !input_root.is_dir() {
        tracing::debug!(root = %input_root.display(), "input root is not a directory");
        return Discovery::default();
    }

    let prune = exclude.filter(|dir| *dir != input_root && dir.starts_with(input_root));

    let walker = WalkDir::new(input_root)
        .min_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| prune.is_none_or(|dir| !entry.path().starts_with(dir)));

    let mut files = BTreeSet::new();
    let mut total_entries = 0;

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        total_entries += 1;

        let path = entry.path();
        if path.is_file() {
            files.insert(path.to_path_buf());
        }
    }

    Discovery {
        files: files.into_iter().collect(),
        total_entries,
    }
}
