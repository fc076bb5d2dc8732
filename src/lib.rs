//! # portrait-crop
//!
//! Batch-crops a directory tree of photographs to a centered 3:4 portrait
//! frame and writes the results to a mirrored output tree.
//!
//! ```text
//! input/a/b/photo.jpg  (300x500)  →  output/a/b/photo.jpg  (300x400)
//! input/x.jpg          (500x300)  →  skipped, landscape
//! ```
//!
//! Each portrait or square image keeps its full width; its height becomes
//! `round(width × 1.3333)`, cut from the vertical center. Images too short
//! for that height are clamped to their own bounds. Landscape images are
//! logged and left alone. Output keeps the source format.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `config.toml` loading, validation, and the documented stock config |
//! | [`discover`] | Recursive walk of the input root |
//! | [`paths`] | Rebasing source paths onto the output root |
//! | [`imaging`] | Crop geometry, the backend trait, and the `image`-crate backend |
//! | [`batch`] | Runs a whole tree and reports counts; also the dry-run `check` |
//! | [`output`] | Summary and check report formatting |
//!
//! # Design Decisions
//!
//! ## Everything Goes Through `CropConfig`
//!
//! Directories, quality, and failure policy live in one value handed to
//! [`batch::run`]. No module keeps global settings, so tests run entire
//! batches against temp directories side by side.
//!
//! ## Rebasing, Not String Replacement
//!
//! Output paths are `output_root / source.strip_prefix(input_root)`,
//! computed on path components. A directory that happens to share the input
//! root's name deeper in the tree is left alone.
//! Both roots are made absolute before a run, so `./photos` and
//! `photos/cropped` are seen as nested however they were typed.
//!
//! ## Header-First Orientation Check
//!
//! Dimensions come from the image header; pixels are decoded only for
//! images that will actually be cropped. A landscape file with a damaged
//! body is therefore skipped, not failed.
//!
//! ## Abort by Default
//!
//! The first unreadable file stops the run, so a bad file never goes
//! unnoticed. `on_error = "skip"` in the config turns that into a logged,
//! counted skip.

pub mod batch;
pub mod config;
pub mod discover;
pub mod imaging;
pub mod output;
pub mod paths;

#[cfg(test)]
pub(crate) mod test_helpers;
