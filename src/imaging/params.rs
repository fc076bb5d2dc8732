//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They sit between
//! [`operations`](super::operations), which decides whether and how an image
//! gets cropped, and the [`backend`](super::backend), which touches pixels.
//! Swapping the backend (e.g. for a recording mock in tests) leaves the
//! planning logic untouched.
//!
//! - [`Quality`]: lossy encoding quality (1-100, default 95). Clamped on construction.
//! - [`CropParams`]: source, output path, clamped crop region and quality.

use super::calculations::Region;
use std::path::PathBuf;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(95)
    }
}

/// Everything the backend needs to crop one file.
#[derive(Debug, Clone, PartialEq)]
pub struct CropParams {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Region already clamped to the source bounds.
    pub region: Region,
    pub quality: Quality,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_default_is_95() {
        assert_eq!(Quality::default().value(), 95);
    }

    #[test]
    fn quality_clamps_out_of_range() {
        assert_eq!(Quality::new(0).value(), 1);
        assert_eq!(Quality::new(250).value(), 100);
        assert_eq!(Quality::new(80).value(), 80);
    }
}
