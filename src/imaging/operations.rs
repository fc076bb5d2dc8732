//! High-level image operations.
//!
//! These functions combine calculations with backend execution. Planning is
//! separate from doing: [`plan_crop`] decides from dimensions alone whether a
//! file is cropped and how, [`crop_image`] runs that plan through a backend.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::{CropRect, is_landscape, portrait_crop};
use super::params::{CropParams, Quality};
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<(u32, u32)> {
    let dims = backend.identify(path)?;
    Ok((dims.width, dims.height))
}

/// What to do with one source image.
#[derive(Debug, Clone, PartialEq)]
pub enum CropPlan {
    /// Wider than tall; left alone.
    SkipLandscape { width: u32, height: u32 },
    /// Crop with the given parameters.
    Crop {
        params: CropParams,
        /// The unclamped 3:4 rectangle.
        rect: CropRect,
        /// Whether `rect` had to be shrunk to fit the image.
        clamped: bool,
    },
}

/// Plan a crop operation without executing it.
pub fn plan_crop(
    source: &Path,
    output: &Path,
    dimensions: (u32, u32),
    quality: Quality,
) -> Result<CropPlan> {
    let (width, height) = dimensions;
    if is_landscape(width, height) {
        return Ok(CropPlan::SkipLandscape { width, height });
    }

    let rect = portrait_crop(dimensions);
    let region = rect.clamp_to(width, height).ok_or_else(|| {
        BackendError::ProcessingFailed(format!(
            "Empty crop region for {}x{} image {}",
            width,
            height,
            source.display()
        ))
    })?;

    Ok(CropPlan::Crop {
        params: CropParams {
            source: source.to_path_buf(),
            output: output.to_path_buf(),
            region,
            quality,
        },
        rect,
        clamped: !rect.fits_within(width, height),
    })
}

/// Outcome of [`crop_image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropOutcome {
    Saved(Dimensions),
    SkippedLandscape(Dimensions),
}

/// Identify, plan, and (for portrait or square images) crop one file.
pub fn crop_image(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    quality: Quality,
) -> Result<CropOutcome> {
    let dimensions = get_dimensions(backend, source)?;

    match plan_crop(source, output, dimensions, quality)? {
        CropPlan::SkipLandscape { width, height } => {
            Ok(CropOutcome::SkippedLandscape(Dimensions { width, height }))
        }
        CropPlan::Crop {
            params,
            rect,
            clamped,
        } => {
            if clamped {
                tracing::debug!(
                    source = %source.display(),
                    width = dimensions.0,
                    height = dimensions.1,
                    target_height = rect.height(),
                    "crop exceeds image height, clamped to bounds"
                );
            }
            let written = backend.crop(&params)?;
            Ok(CropOutcome::Saved(written))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use crate::imaging::calculations::Region;

    #[test]
    fn get_dimensions_calls_backend() {
        let backend = MockBackend::with_dimensions(&[("test.jpg", 1920, 1080)]);

        let dims = get_dimensions(&backend, Path::new("/test.jpg")).unwrap();
        assert_eq!(dims, (1920, 1080));
    }

    #[test]
    fn plan_crop_landscape_is_skipped() {
        let plan = plan_crop(
            Path::new("/in/x.jpg"),
            Path::new("/out/x.jpg"),
            (500, 300),
            Quality::default(),
        )
        .unwrap();

        assert_eq!(
            plan,
            CropPlan::SkipLandscape {
                width: 500,
                height: 300
            }
        );
    }

    #[test]
    fn plan_crop_portrait_centers_region() {
        let plan = plan_crop(
            Path::new("/in/a/b/photo.jpg"),
            Path::new("/out/a/b/photo.jpg"),
            (300, 500),
            Quality::default(),
        )
        .unwrap();

        let (params, clamped) = match plan {
            CropPlan::Crop {
                params, clamped, ..
            } => (params, clamped),
            other => panic!("expected a crop plan, got {other:?}"),
        };
        assert!(!clamped);
        assert_eq!(
            params.region,
            Region {
                x: 0,
                y: 50,
                width: 300,
                height: 400
            }
        );
        assert_eq!(params.quality.value(), 95);
        assert_eq!(params.output, Path::new("/out/a/b/photo.jpg"));
    }

    #[test]
    fn plan_crop_square_is_clamped() {
        let plan = plan_crop(
            Path::new("/in/sq.jpg"),
            Path::new("/out/sq.jpg"),
            (300, 300),
            Quality::default(),
        )
        .unwrap();

        let (params, rect, clamped) = match plan {
            CropPlan::Crop {
                params,
                rect,
                clamped,
            } => (params, rect, clamped),
            other => panic!("expected a crop plan, got {other:?}"),
        };
        assert!(clamped);
        assert_eq!(rect.height(), 400);
        assert_eq!(params.region.height, 300);
        assert_eq!(params.region.y, 0);
    }

    #[test]
    fn plan_crop_zero_sized_image_errors() {
        let result = plan_crop(
            Path::new("/in/empty.png"),
            Path::new("/out/empty.png"),
            (0, 0),
            Quality::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn crop_image_landscape_never_crops() {
        let backend = MockBackend::with_dimensions(&[("x.jpg", 500, 300)]);

        let outcome = crop_image(
            &backend,
            Path::new("/in/x.jpg"),
            Path::new("/out/x.jpg"),
            Quality::default(),
        )
        .unwrap();

        assert_eq!(
            outcome,
            CropOutcome::SkippedLandscape(Dimensions {
                width: 500,
                height: 300
            })
        );
        assert!(backend.crops().is_empty());
    }

    #[test]
    fn crop_image_portrait_uses_backend() {
        let backend = MockBackend::with_dimensions(&[("photo.jpg", 300, 500)]);

        let outcome = crop_image(
            &backend,
            Path::new("/in/photo.jpg"),
            Path::new("/out/photo.jpg"),
            Quality::new(80),
        )
        .unwrap();

        assert_eq!(
            outcome,
            CropOutcome::Saved(Dimensions {
                width: 300,
                height: 400
            })
        );
        let ops = backend.get_operations();
        assert_eq!(ops.len(), 2);
        assert!(matches!(&ops[0], RecordedOp::Identify(_)));
        match &ops[1] {
            RecordedOp::Crop {
                output,
                y,
                height,
                quality,
                ..
            } => {
                assert_eq!(output, "/out/photo.jpg");
                assert_eq!((*y, *height, *quality), (50, 400, 80));
            }
            other => panic!("expected a crop, got {other:?}"),
        }
    }

    #[test]
    fn crop_image_propagates_identify_failure() {
        let backend = MockBackend::new();
        let result = crop_image(
            &backend,
            Path::new("/in/corrupt.jpg"),
            Path::new("/out/corrupt.jpg"),
            Quality::default(),
        );
        assert!(result.is_err());
        assert!(backend.crops().is_empty());
    }
}
