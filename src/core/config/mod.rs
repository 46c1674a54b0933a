//! Configuration management for the extraction pipeline.

mod parallel;

pub use parallel::ParallelPolicy;

use crate::core::errors::ExtractError;
use serde::{Deserialize, Serialize};

/// Tuning knobs for layout reconstruction and line-item extraction.
///
/// All knobs are plain parameters rather than environment variables or CLI
/// flags; the crate is a library core and callers own the outer surface.
/// The defaults are the values the heuristics were calibrated with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Vertical tolerance in pixels when grouping tokens into rows.
    /// Two tokens belong to the same row when their vertical centers differ
    /// by at most this much. Default: 12.0
    #[serde(default = "ExtractionConfig::default_y_thresh")]
    pub y_thresh: f32,

    /// Upper bound on the number of inferred table columns. Default: 6
    #[serde(default = "ExtractionConfig::default_max_cols")]
    pub max_cols: usize,

    /// Minimum name similarity (0-100 scale) for two items to be considered
    /// duplicates during cross-page deduplication. Default: 85.0
    #[serde(default = "ExtractionConfig::default_name_threshold")]
    pub name_threshold: f64,

    /// Absolute amount tolerance (in currency units) when comparing candidate
    /// duplicate items. Default: 1.0
    #[serde(default = "ExtractionConfig::default_amount_tol")]
    pub amount_tol: f64,
}

impl ExtractionConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the row grouping tolerance.
    pub fn with_y_thresh(mut self, y_thresh: f32) -> Self {
        self.y_thresh = y_thresh;
        self
    }

    /// Sets the maximum number of inferred columns.
    pub fn with_max_cols(mut self, max_cols: usize) -> Self {
        self.max_cols = max_cols;
        self
    }

    /// Sets the deduplication name similarity threshold.
    pub fn with_name_threshold(mut self, name_threshold: f64) -> Self {
        self.name_threshold = name_threshold;
        self
    }

    /// Sets the deduplication amount tolerance.
    pub fn with_amount_tol(mut self, amount_tol: f64) -> Self {
        self.amount_tol = amount_tol;
        self
    }

    /// Validates the configuration.
    ///
    /// # Returns
    ///
    /// `Ok(())` when every knob is usable, otherwise a
    /// [`ExtractError::ConfigError`] naming the offending field.
    pub fn validate(&self) -> Result<(), ExtractError> {
        if !self.y_thresh.is_finite() || self.y_thresh <= 0.0 {
            return Err(ExtractError::invalid_field(
                "y_thresh",
                "a positive finite pixel tolerance",
                format!("{}", self.y_thresh),
            ));
        }
        if self.max_cols < 2 {
            return Err(ExtractError::invalid_field(
                "max_cols",
                "at least 2",
                format!("{}", self.max_cols),
            ));
        }
        if !self.name_threshold.is_finite()
            || !(0.0..=100.0).contains(&self.name_threshold)
        {
            return Err(ExtractError::invalid_field(
                "name_threshold",
                "a similarity score between 0 and 100",
                format!("{}", self.name_threshold),
            ));
        }
        if !self.amount_tol.is_finite() || self.amount_tol < 0.0 {
            return Err(ExtractError::invalid_field(
                "amount_tol",
                "a non-negative finite tolerance",
                format!("{}", self.amount_tol),
            ));
        }
        Ok(())
    }

    fn default_y_thresh() -> f32 {
        12.0
    }

    fn default_max_cols() -> usize {
        6
    }

    fn default_name_threshold() -> f64 {
        85.0
    }

    fn default_amount_tol() -> f64 {
        1.0
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            y_thresh: Self::default_y_thresh(),
            max_cols: Self::default_max_cols(),
            name_threshold: Self::default_name_threshold(),
            amount_tol: Self::default_amount_tol(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.y_thresh, 12.0);
        assert_eq!(config.max_cols, 6);
        assert_eq!(config.name_threshold, 85.0);
        assert_eq!(config.amount_tol, 1.0);
    }

    #[test]
    fn test_builder_style_overrides() {
        let config = ExtractionConfig::new()
            .with_y_thresh(15.0)
            .with_max_cols(4)
            .with_name_threshold(90.0)
            .with_amount_tol(0.5);
        assert!(config.validate().is_ok());
        assert_eq!(config.y_thresh, 15.0);
        assert_eq!(config.max_cols, 4);
    }

    #[test]
    fn test_rejects_non_positive_y_thresh() {
        let config = ExtractionConfig::new().with_y_thresh(0.0);
        assert!(config.validate().is_err());
        let config = ExtractionConfig::new().with_y_thresh(f32::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_degenerate_max_cols() {
        let config = ExtractionConfig::new().with_max_cols(1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_out_of_scale_name_threshold() {
        let config = ExtractionConfig::new().with_name_threshold(120.0);
        assert!(config.validate().is_err());
        let config = ExtractionConfig::new().with_name_threshold(-1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serde_defaults_fill_missing_fields() {
        let config: ExtractionConfig = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(config.max_cols, 6);
        assert_eq!(config.amount_tol, 1.0);
    }
}
