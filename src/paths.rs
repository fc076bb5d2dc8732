//! Mapping source paths into the output tree.
//!
//! A source file's output location is its path relative to the input root,
//! rebased onto the output root:
//!
//! ```text
//! input/a/b/photo.jpg  →  output/a/b/photo.jpg
//! input/top.jpg        →  output/top.jpg
//! ```
//!
//! The mapping works on path components, not on the path string, so an input
//! root whose name also appears deeper in the tree (`input/input/x.jpg`) is
//! handled correctly. A path that is already inside the output root is
//! returned as-is, which keeps the mapping from stacking prefixes.
//!
//! Prefix checks compare components literally, so `./photos` and `photos`
//! are different roots to them. Roots go through [`absolute_root`] before a
//! run to give both the same spelling.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PathError {
    #[error("{path} is not inside input root {root}")]
    OutsideInputRoot { path: PathBuf, root: PathBuf },
    #[error("Failed to resolve {path}: {source}")]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to create output directory {dir}: {source}")]
    CreateDir {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Make a root absolute against the current directory, dropping `.`
/// components. Symlinks are not resolved and the root need not exist.
pub fn absolute_root(root: &Path) -> Result<PathBuf, PathError> {
    std::path::absolute(root).map_err(|source| PathError::Resolve {
        path: root.to_path_buf(),
        source,
    })
}

/// Compute the output path for `source` without touching the filesystem.
pub fn map_output_path(
    source: &Path,
    input_root: &Path,
    output_root: &Path,
) -> Result<PathBuf, PathError> {
    // With one root nested in the other a source can sit under both; the
    // deeper root decides.
    let input_is_deeper = input_root.starts_with(output_root) && source.starts_with(input_root);
    if source.starts_with(output_root) && !input_is_deeper {
        return Ok(source.to_path_buf());
    }

    let relative = source
        .strip_prefix(input_root)
        .map_err(|_| PathError::OutsideInputRoot {
            path: source.to_path_buf(),
            root: input_root.to_path_buf(),
        })?;

    Ok(output_root.join(relative))
}

/// Compute the output path for `source` and create its parent directory
/// (with all missing ancestors).
pub fn prepare_output_path(
    source: &Path,
    input_root: &Path,
    output_root: &Path,
) -> Result<PathBuf, PathError> {
    let output = map_output_path(source, input_root, output_root)?;
    let dir = output.parent().unwrap_or(output_root);

    if !dir.is_dir() {
        std::fs::create_dir_all(dir).map_err(|source| PathError::CreateDir {
            dir: dir.to_path_buf(),
            source,
        })?;
    }

    Ok(output)
}
