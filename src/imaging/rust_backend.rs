//! Pure Rust image processing backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::ImageReader::into_dimensions` (header only) |
//! | Decode (JPEG, PNG, TIFF, WebP) | `image::ImageReader::decode`, format sniffed from content |
//! | Crop | `image::DynamicImage::crop_imm` |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` at the requested quality |
//! | Encode → PNG, TIFF, WebP | `image::DynamicImage::write_to` (lossless, quality ignored) |
//!
//! The output format always follows the output file's extension, which is
//! the source file's extension: there is no format conversion.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::CropParams;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::{Cursor, Write};
use std::path::Path;

/// Pure Rust backend using the `image` crate.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn open(path: &Path) -> Result<ImageReader<std::io::BufReader<std::fs::File>>, BackendError> {
    Ok(ImageReader::open(path)?.with_guessed_format()?)
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    open(path)?.decode().map_err(|e| {
        BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
    })
}

/// Pick the encoder from the output extension.
fn output_format(path: &Path) -> Result<ImageFormat, BackendError> {
    let unsupported = || {
        BackendError::UnsupportedFormat(
            path.extension()
                .map(|e| e.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string()),
        )
    };
    let format = ImageFormat::from_path(path).map_err(|_| unsupported())?;
    if !format.writing_enabled() {
        return Err(unsupported());
    }
    Ok(format)
}

/// Save a DynamicImage to the given path in the format its extension names.
///
/// The image is encoded in memory first, so a failed encode never leaves a
/// partial file behind or clobbers an earlier output.
fn save_image(img: &DynamicImage, path: &Path, quality: u32) -> Result<(), BackendError> {
    let format = output_format(path)?;
    let mut buffer = Cursor::new(Vec::new());

    match format {
        ImageFormat::Jpeg => save_jpeg(img, &mut buffer, quality)?,
        other => img.write_to(&mut buffer, other).map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to encode {}: {}", path.display(), e))
        })?,
    }

    std::fs::write(path, buffer.into_inner())?;
    Ok(())
}

/// JPEG has no alpha channel and only 8-bit samples, so anything else is
/// flattened to RGB8 first.
fn save_jpeg<W: Write>(
    img: &DynamicImage,
    writer: &mut W,
    quality: u32,
) -> Result<(), BackendError> {
    let encoder = JpegEncoder::new_with_quality(writer, quality.clamp(1, 100) as u8);
    let result = match img {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => img.write_with_encoder(encoder),
        _ => DynamicImage::ImageRgb8(img.to_rgb8()).write_with_encoder(encoder),
    };
    result.map_err(|e| BackendError::ProcessingFailed(format!("JPEG encode failed: {}", e)))
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = open(path)?.into_dimensions().map_err(|e| {
            BackendError::ProcessingFailed(format!(
                "Failed to read dimensions of {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Dimensions { width, height })
    }

    fn crop(&self, params: &CropParams) -> Result<Dimensions, BackendError> {
        let img = load_image(&params.source)?;
        let region = params.region;
        let cropped = img.crop_imm(region.x, region.y, region.width, region.height);
        // Release the full-size buffer before encoding.
        drop(img);

        save_image(&cropped, &params.output, params.quality.value())?;
        Ok(Dimensions {
            width: cropped.width(),
            height: cropped.height(),
        })
    }
}
