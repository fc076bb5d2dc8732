//! Batch cropping of a whole input tree.
//!
//! Takes a [`CropConfig`], discovers every file under the input root, and
//! crops each one into the mirrored output tree:
//!
//! ```text
//! input/                       output/
//! ├── top.jpg      (600x900)   ├── top.jpg      600x800
//! ├── wide.jpg     (900x600)   │                (skipped: landscape)
//! └── a/                       └── a/
//!     └── b/                       └── b/
//!         └── photo.jpg            └── photo.jpg 300x400
//! ```
//!
//! ## Per-file steps
//!
//! 1. Map the source onto the output root and create the output directory.
//! 2. Read the dimensions. Landscape images are logged and skipped.
//! 3. Decode, crop to the centered 3:4 region, encode at the configured
//!    quality, and write. Existing outputs are overwritten.
//!
//! Files are processed one at a time, in sorted order. Only the counters in
//! [`BatchSummary`] carry over from one file to the next.
//!
//! ## Failures
//!
//! With [`OnError::Abort`] (the default) the first file that cannot be read,
//! decoded, or written stops the run and the error is returned. With
//! [`OnError::Skip`] the failure is logged, counted in
//! [`BatchSummary::failed`], and the run moves on.

use crate::config::{CropConfig, OnError};
use crate::discover::discover;
use crate::imaging::{
    BackendError, CropOutcome, CropPlan, ImageBackend, Quality, RustBackend, crop_image,
    get_dimensions, plan_crop,
};
use crate::output;
use crate::paths::{PathError, absolute_root, map_output_path, prepare_output_path};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error(transparent)]
    Path(#[from] PathError),
    #[error("Failed to process {path}: {source}")]
    Imaging {
        path: PathBuf,
        #[source]
        source: BackendError,
    },
}

/// Counts reported at the end of a run.
///
/// `saved <= input_files <= total_paths` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Unique regular files discovered under the input root.
    pub input_files: usize,
    /// Files cropped and written.
    pub saved: usize,
    /// Landscape files left alone.
    pub skipped: usize,
    /// Files that failed under [`OnError::Skip`].
    pub failed: usize,
    /// All entries seen during traversal, directories included.
    pub total_paths: usize,
}

/// What happened to a single source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Saved { output: PathBuf },
    SkippedLandscape { width: u32, height: u32 },
}

/// Full record of a run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub summary: BatchSummary,
    /// Output paths written, in processing order.
    pub saved: Vec<PathBuf>,
    /// Source paths skipped as landscape.
    pub skipped: Vec<PathBuf>,
    /// Source paths that failed, with the error message.
    pub failed: Vec<(PathBuf, String)>,
}

pub fn run(config: &CropConfig) -> Result<BatchReport, BatchError> {
    let backend = RustBackend::new();
    run_with_backend(&backend, config)
}

/// Run the batch using a specific backend (allows testing with mock).
pub fn run_with_backend(
    backend: &impl ImageBackend,
    config: &CropConfig,
) -> Result<BatchReport, BatchError> {
    let config = &resolve_roots(config)?;
    let discovery = discover(&config.input_dir, Some(&config.output_dir));
    if discovery.is_empty() {
        tracing::info!("No files found under {}", config.input_dir.display());
    }

    let mut report = BatchReport {
        summary: BatchSummary {
            input_files: discovery.files.len(),
            total_paths: discovery.total_entries,
            ..BatchSummary::default()
        },
        ..BatchReport::default()
    };

    for source in &discovery.files {
        match process_file(backend, source, config) {
            Ok(FileOutcome::Saved { output }) => {
                tracing::info!("File saved: {}", output.display());
                report.summary.saved += 1;
                report.saved.push(output);
            }
            Ok(FileOutcome::SkippedLandscape { width, height }) => {
                tracing::warn!(
                    "{} - width is greater than height ({}x{}). File skipped.",
                    display_name(source),
                    width,
                    height
                );
                report.summary.skipped += 1;
                report.skipped.push(source.clone());
            }
            Err(e) => match config.processing.on_error {
                OnError::Abort => return Err(e),
                OnError::Skip => {
                    tracing::error!("{}. File skipped.", e);
                    report.summary.failed += 1;
                    report.failed.push((source.clone(), e.to_string()));
                }
            },
        }
    }

    tracing::info!("{}", output::format_summary(&report.summary));
    Ok(report)
}

/// Crop one discovered file into the output tree.
///
/// The output directory is created before the image is inspected, so even a
/// skipped file leaves its (possibly empty) directory behind.
pub fn process_file(
    backend: &impl ImageBackend,
    source: &Path,
    config: &CropConfig,
) -> Result<FileOutcome, BatchError> {
    let output = prepare_output_path(source, &config.input_dir, &config.output_dir)?;
    let quality = Quality::new(config.encoding.quality);

    let outcome = crop_image(backend, source, &output, quality).map_err(|source_err| {
        BatchError::Imaging {
            path: source.to_path_buf(),
            source: source_err,
        }
    })?;

    Ok(match outcome {
        CropOutcome::Saved(_) => FileOutcome::Saved { output },
        CropOutcome::SkippedLandscape(dims) => FileOutcome::SkippedLandscape {
            width: dims.width,
            height: dims.height,
        },
    })
}

/// One line of a dry run.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckEntry {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Source dimensions, when the header could be read.
    pub dimensions: Option<(u32, u32)>,
    /// The crop plan, or why it could not be made.
    pub plan: Result<CropPlan, String>,
}

/// Result of [`check`].
#[derive(Debug, Default)]
pub struct CheckReport {
    pub entries: Vec<CheckEntry>,
    pub total_paths: usize,
}

/// Plan the whole run without writing anything.
///
/// Only image headers are read. Files whose headers cannot be read are
/// reported in their entry instead of stopping the check.
pub fn check(backend: &impl ImageBackend, config: &CropConfig) -> Result<CheckReport, BatchError> {
    let config = &resolve_roots(config)?;
    let discovery = discover(&config.input_dir, Some(&config.output_dir));
    let quality = Quality::new(config.encoding.quality);

    let mut entries = Vec::with_capacity(discovery.files.len());
    for source in discovery.files {
        let output = map_output_path(&source, &config.input_dir, &config.output_dir)?;
        let dimensions = get_dimensions(backend, &source);
        let plan = match &dimensions {
            Ok(dims) => plan_crop(&source, &output, *dims, quality).map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };
        entries.push(CheckEntry {
            source,
            output,
            dimensions: dimensions.ok(),
            plan,
        });
    }

    Ok(CheckReport {
        entries,
        total_paths: discovery.total_entries,
    })
}

/// Copy of `config` with both roots made absolute, so nesting checks between
/// them hold however each root was spelled.
pub fn resolve_roots(config: &CropConfig) -> Result<CropConfig, BatchError> {
    Ok(CropConfig {
        input_dir: absolute_root(&config.input_dir)?,
        output_dir: absolute_root(&config.output_dir)?,
        ..config.clone()
    })
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
