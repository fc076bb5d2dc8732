//! Pure calculation functions for crop geometry.
//!
//! All functions here are pure and testable without any I/O or images.

/// How much taller than wide a 3:4 portrait is, in percent of the width.
pub const PORTRAIT_HEIGHT_PERCENT: f64 = 33.33;

/// Target height of a 3:4 crop for an image of the given width.
///
/// The width is scaled up by [`PORTRAIT_HEIGHT_PERCENT`] and rounded half
/// away from zero.
///
/// ```
/// # use portrait_crop::imaging::target_height;
/// assert_eq!(target_height(300), 400);
/// assert_eq!(target_height(1000), 1333);
/// ```
pub fn target_height(width: u32) -> u32 {
    let w = width as f64;
    (w + PORTRAIT_HEIGHT_PERCENT * (w / 100.0)).round() as u32
}

/// Whether an image is wider than it is tall. Square images are not landscape.
pub fn is_landscape(width: u32, height: u32) -> bool {
    width > height
}

/// A crop rectangle in source pixel coordinates, edges exclusive on the
/// right/bottom. Coordinates may fall outside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

/// An in-bounds region: top-left corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub fn width(&self) -> i64 {
        self.right - self.left
    }

    pub fn height(&self) -> i64 {
        self.bottom - self.top
    }

    /// True when every edge lies within a `width` x `height` image.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.left >= 0
            && self.top >= 0
            && self.right <= width as i64
            && self.bottom <= height as i64
    }

    /// Intersect with the bounds of a `width` x `height` image.
    ///
    /// Returns `None` when the intersection is empty.
    pub fn clamp_to(&self, width: u32, height: u32) -> Option<Region> {
        let left = self.left.clamp(0, width as i64);
        let top = self.top.clamp(0, height as i64);
        let right = self.right.clamp(0, width as i64);
        let bottom = self.bottom.clamp(0, height as i64);

        if right <= left || bottom <= top {
            return None;
        }

        Some(Region {
            x: left as u32,
            y: top as u32,
            width: (right - left) as u32,
            height: (bottom - top) as u32,
        })
    }
}

/// Center a `crop_width` x `crop_height` rectangle inside the source image.
///
/// Offsets use floor division, so a crop larger than the source produces
/// negative left/top coordinates rather than being shrunk.
pub fn centered_crop(source: (u32, u32), crop_width: u32, crop_height: u32) -> CropRect {
    let (src_w, src_h) = (source.0 as i64, source.1 as i64);
    let (crop_w, crop_h) = (crop_width as i64, crop_height as i64);

    let left = (src_w - crop_w).div_euclid(2);
    let top = (src_h - crop_h).div_euclid(2);

    CropRect {
        left,
        top,
        right: left + crop_w,
        bottom: top + crop_h,
    }
}

/// Full-width, vertically centered 3:4 crop for a portrait or square image.
pub fn portrait_crop(source: (u32, u32)) -> CropRect {
    let (width, _) = source;
    centered_crop(source, width, target_height(width))
}
