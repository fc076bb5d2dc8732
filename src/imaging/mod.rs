//! Image processing.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::ImageReader::into_dimensions` |
//! | **Crop** | `DynamicImage::crop_imm` on a clamped region |
//! | **Encode** | same format as the source, JPEG at the configured quality |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for crop geometry (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{
    CropRect, PORTRAIT_HEIGHT_PERCENT, Region, centered_crop, is_landscape, portrait_crop,
    target_height,
};
pub use operations::{CropOutcome, CropPlan, crop_image, get_dimensions, plan_crop};
pub use params::{CropParams, Quality};
pub use rust_backend::RustBackend;
