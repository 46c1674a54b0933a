//! Collaborator interfaces feeding the extraction core.
//!
//! Document acquisition, page rasterization, and token recognition are
//! external concerns. The core consumes them through these traits so callers
//! can bring their own backends (network fetchers, PDF renderers, ONNX
//! recognizers) and impose timeouts or retries at this boundary; the core
//! itself performs no blocking I/O.

use crate::core::errors::ExtractError;
use crate::domain::structure::Token;
use image::RgbImage;
use std::path::{Path, PathBuf};

/// Token-recognition collaborator.
///
/// Implementations are expected to be initialized once per process (model and
/// session reuse) and passed by reference into per-page calls; the pipeline
/// never constructs or tears down an engine itself.
pub trait RecognitionEngine: Send + Sync {
    /// Recognizes all text tokens on one page image.
    ///
    /// The returned tokens carry no ordering guarantee. An error here is
    /// non-fatal to the document: the orchestrator downgrades the page to
    /// zero line items and an empty text blob.
    fn recognize(&self, page: &RgbImage) -> Result<Vec<Token>, ExtractError>;
}

/// Rasterization collaborator turning a resolved document into page images.
pub trait PageRasterizer: Send + Sync {
    /// Renders the document at `path` into an ordered sequence of page
    /// images (page 1 first). Single-image documents yield one page.
    fn rasterize(&self, path: &Path) -> Result<Vec<RgbImage>, ExtractError>;
}

/// Fetch/resolve collaborator producing a single local document path.
pub trait DocumentSource: Send + Sync {
    /// Resolves the source to a local path. Failure here is fatal and aborts
    /// the whole extraction.
    fn resolve(&self) -> Result<PathBuf, ExtractError>;
}

/// A document that already exists on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalDocument {
    path: PathBuf,
}

impl LocalDocument {
    /// Creates a source for a local file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DocumentSource for LocalDocument {
    fn resolve(&self) -> Result<PathBuf, ExtractError> {
        if self.path.exists() {
            Ok(self.path.clone())
        } else {
            Err(ExtractError::input_resolution(format!(
                "local path not found: {}",
                self.path.display()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_document_resolves_existing_path() {
        let dir = std::env::temp_dir();
        let source = LocalDocument::new(&dir);
        assert_eq!(source.resolve().expect("resolves"), dir);
    }

    #[test]
    fn test_local_document_missing_path_is_input_resolution_error() {
        let source = LocalDocument::new("/definitely/not/a/real/bill.png");
        match source.resolve() {
            Err(ExtractError::InputResolution { message }) => {
                assert!(message.contains("not found"));
            }
            other => panic!("expected InputResolution, got {other:?}"),
        }
    }
}
