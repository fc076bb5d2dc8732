//! Run configuration.
//!
//! Every run is driven by a [`CropConfig`] value passed into
//! [`batch::run`](crate::batch::run); nothing is read from module-level state.
//! The config starts from stock defaults and is optionally overridden by a
//! TOML file (by default `config.toml` in the working directory) and then by
//! command-line flags.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! input_dir = "input"       # Tree of source photographs
//! output_dir = "output"     # Mirrored tree of cropped results
//!
//! [encoding]
//! quality = 95              # JPEG quality (1-100); lossless formats ignore it
//!
//! [processing]
//! on_error = "abort"        # "abort" stops the run, "skip" logs and continues
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early. The 3:4 crop ratio is fixed and has no
//! config key.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration for a crop run.
///
/// All fields have defaults reproducing the classic behavior: `input/` is
/// mirrored into `output/` at JPEG quality 95, and the first failing file
/// aborts the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CropConfig {
    /// Root of the source tree.
    pub input_dir: PathBuf,
    /// Root of the mirrored output tree.
    pub output_dir: PathBuf,
    /// Encoder settings.
    pub encoding: EncodingConfig,
    /// Failure handling.
    pub processing: ProcessingConfig,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("output"),
            encoding: EncodingConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl CropConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.encoding.quality == 0 || self.encoding.quality > 100 {
            return Err(ConfigError::Validation("encoding.quality must be 1-100".into()));
        }
        if self.input_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation("input_dir must not be empty".into()));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "output_dir must not be empty".into(),
            ));
        }
        if self.input_dir == self.output_dir {
            return Err(ConfigError::Validation(
                "input_dir and output_dir must differ".into(),
            ));
        }
        Ok(())
    }

    /// Apply command-line directory overrides, then re-validate.
    pub fn with_overrides(
        mut self,
        input_dir: Option<PathBuf>,
        output_dir: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        if let Some(dir) = input_dir {
            self.input_dir = dir;
        }
        if let Some(dir) = output_dir {
            self.output_dir = dir;
        }
        self.validate()?;
        Ok(self)
    }
}

/// Encoder settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncodingConfig {
    /// Lossy encoding quality (1 = worst, 100 = best).
    pub quality: u32,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self { quality: 95 }
    }
}

/// What to do when a file cannot be read, decoded, or written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnError {
    /// Stop the whole run at the first failure.
    #[default]
    Abort,
    /// Log the failure, count it, and move on to the next file.
    Skip,
}

/// Failure handling settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    pub on_error: OnError,
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(CropConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<CropConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: CropConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the given file, falling back to defaults when absent.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(path: &Path) -> Result<CropConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# portrait-crop configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Unknown keys will cause an error. The 3:4 crop ratio is fixed.

# Tree of source photographs. Every regular file below it is processed.
input_dir = "input"

# Mirrored tree of cropped results. Subdirectories are created as needed and
# existing files are overwritten.
output_dir = "output"

# ---------------------------------------------------------------------------
# Encoding
# ---------------------------------------------------------------------------
[encoding]
# JPEG quality (1 = worst, 100 = best). PNG, TIFF and WebP are written
# losslessly and ignore this value.
quality = 95

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# What happens when a file cannot be decoded or written:
#   "abort" - stop the run at the first failure
#   "skip"  - log the failure and continue with the next file
on_error = "abort"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = CropConfig::default();
        assert_eq!(config.input_dir, PathBuf::from("input"));
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.encoding.quality, 95);
        assert_eq!(config.processing.on_error, OnError::Abort);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[encoding]
quality = 80
"#;
        let config: CropConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.encoding.quality, 80);
        // Defaults preserved
        assert_eq!(config.input_dir, PathBuf::from("input"));
        assert_eq!(config.processing.on_error, OnError::Abort);
    }

    #[test]
    fn parse_on_error_skip() {
        let toml = r#"
[processing]
on_error = "skip"
"#;
        let config: CropConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.processing.on_error, OnError::Skip);
    }

    #[test]
    fn parse_on_error_unknown_value_rejected() {
        let toml = r#"
[processing]
on_error = "retry"
"#;
        let result: Result<CropConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join(CONFIG_FILENAME)).unwrap();
        assert_eq!(config, CropConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            r#"
input_dir = "photos"
output_dir = "cropped"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.input_dir, PathBuf::from("photos"));
        assert_eq!(config.output_dir, PathBuf::from("cropped"));
        assert_eq!(config.encoding.quality, 95);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILENAME);
        fs::write(&path, "this is not valid toml [[[").unwrap();

        let result = load_config(&path);
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            r#"
[encoding]
quality = 200
"#,
        )
        .unwrap();

        let result = load_config(&path);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn unknown_key_rejected_via_load_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            r#"
[encoding]
qualty = 90
"#,
        )
        .unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("unknown field"));
    }

    #[test]
    fn aspect_ratio_is_not_configurable() {
        let toml = r#"aspect_ratio = [1, 1]"#;
        let result: Result<CropConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_table_merge() {
        let base = stock_defaults_value().unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[encoding]
quality = 70
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(
            merged
                .get("encoding")
                .unwrap()
                .get("quality")
                .unwrap()
                .as_integer(),
            Some(70)
        );
        assert_eq!(merged.get("input_dir").unwrap().as_str(), Some("input"));
    }

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str(r#"input_dir = "a""#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"input_dir = "b""#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("input_dir").unwrap().as_str(), Some("b"));
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(CropConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_quality_bounds() {
        let mut config = CropConfig::default();
        config.encoding.quality = 100;
        assert!(config.validate().is_ok());

        config.encoding.quality = 0;
        assert!(config.validate().is_err());

        config.encoding.quality = 101;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("quality"));
    }

    #[test]
    fn validate_same_input_and_output_rejected() {
        let config = CropConfig {
            output_dir: PathBuf::from("input"),
            ..CropConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn overrides_replace_directories() {
        let config = CropConfig::default()
            .with_overrides(Some("in".into()), None)
            .unwrap();
        assert_eq!(config.input_dir, PathBuf::from("in"));
        assert_eq!(config.output_dir, PathBuf::from("output"));
    }

    #[test]
    fn overrides_are_validated() {
        let result = CropConfig::default().with_overrides(None, Some("input".into()));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // stock_config_toml tests
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: CropConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, CropConfig::default());
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value().unwrap();
        assert!(val.get("input_dir").is_some());
        assert!(val.get("output_dir").is_some());
        assert!(val.get("encoding").is_some());
        assert!(val.get("processing").is_some());
    }
}
