//! Core error types for the extraction pipeline.
//!
//! Fatal failures (input resolution, rasterization, configuration) surface as
//! [`ExtractError`] and abort the whole extraction. Per-page recognition
//! failures are produced by the recognition collaborator and downgraded to an
//! empty page by the orchestrator, so one bad page never discards the rest of
//! the document. Row-level parse ambiguity is not an error at all: ambiguous
//! rows are dropped as noise.

use thiserror::Error;

/// Convenience alias for results produced by the extraction pipeline.
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Errors that can occur while extracting line items from a document.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The source document could not be resolved to a local path.
    #[error("input resolution failed: {message}")]
    InputResolution {
        /// A message describing why resolution failed.
        message: String,
    },

    /// The recognition collaborator failed on one page.
    #[error("recognition failed on page {page}: {message}")]
    Recognition {
        /// 1-based index of the page that failed.
        page: usize,
        /// A message describing the recognition failure.
        message: String,
    },

    /// The rasterization collaborator could not produce page images.
    #[error("page rasterization failed: {message}")]
    Rasterization {
        /// A message describing the rasterization failure.
        message: String,
    },

    /// Error indicating a configuration problem.
    #[error("configuration: {message}")]
    ConfigError {
        /// A message describing the configuration error.
        message: String,
    },

    /// IO error.
    #[error("io")]
    Io(#[from] std::io::Error),
}

impl ExtractError {
    /// Creates an input resolution error.
    pub fn input_resolution(message: impl Into<String>) -> Self {
        Self::InputResolution {
            message: message.into(),
        }
    }

    /// Creates a per-page recognition error.
    pub fn recognition(page: usize, message: impl Into<String>) -> Self {
        Self::Recognition {
            page,
            message: message.into(),
        }
    }

    /// Creates a rasterization error.
    pub fn rasterization(message: impl Into<String>) -> Self {
        Self::Rasterization {
            message: message.into(),
        }
    }

    /// Creates a configuration error with enhanced context.
    ///
    /// # Arguments
    ///
    /// * `context` - High-level description of what was being configured
    /// * `details` - Specific details about what went wrong
    pub fn config_error_detailed(context: impl Into<String>, details: impl Into<String>) -> Self {
        Self::ConfigError {
            message: format!("{}: {}", context.into(), details.into()),
        }
    }

    /// Creates a configuration error for invalid field values.
    ///
    /// # Arguments
    ///
    /// * `field` - The name of the field with an invalid value
    /// * `expected` - Description of what was expected
    /// * `actual` - Description of what was actually provided
    pub fn invalid_field(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::ConfigError {
            message: format!(
                "invalid value for field '{}': expected {}, got {}",
                field.into(),
                expected.into(),
                actual.into()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_field_formats_message() {
        let err = ExtractError::invalid_field("max_cols", "at least 2", "0");
        assert!(matches!(err, ExtractError::ConfigError { .. }));
        assert!(err.to_string().contains("max_cols"));
        assert!(err.to_string().contains("at least 2"));
    }

    #[test]
    fn test_recognition_error_carries_page() {
        let err = ExtractError::recognition(3, "no tokens");
        assert!(err.to_string().contains("page 3"));
    }
}
