//! Shared parallel processing configuration types.

use serde::{Deserialize, Serialize};

/// Centralized configuration for parallel processing behavior across the
/// extraction pipeline.
///
/// Per-page extraction has no cross-page data dependency until deduplication,
/// so pages can be processed on worker threads and reassembled in page order.
/// Deduplication and totals reconciliation always run single-threaded over
/// the complete, ordered item list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParallelPolicy {
    /// Maximum number of threads to use for parallel processing.
    /// If None, rayon will use the default thread pool size (typically number
    /// of CPU cores). Default: None
    #[serde(default)]
    pub max_threads: Option<usize>,

    /// Page-count threshold for per-page extraction (<= this uses sequential)
    /// Default: 1 (single-page documents are processed inline)
    #[serde(default = "ParallelPolicy::default_page_threshold")]
    pub page_threshold: usize,
}

impl ParallelPolicy {
    /// Create a new ParallelPolicy with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of threads.
    pub fn with_max_threads(mut self, max_threads: Option<usize>) -> Self {
        self.max_threads = max_threads;
        self
    }

    /// Set the page-count threshold below which extraction stays sequential.
    pub fn with_page_threshold(mut self, threshold: usize) -> Self {
        self.page_threshold = threshold;
        self
    }

    /// Install the global rayon thread pool with the configured number of
    /// threads.
    ///
    /// This method should be called once at application startup before any
    /// parallel processing occurs. If `max_threads` is None, this method does
    /// nothing and rayon will use its default thread pool size.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the thread pool was successfully configured
    /// - `Ok(false)` if `max_threads` is None (no configuration needed)
    /// - `Err` if the thread pool has already been initialized
    pub fn install_global_thread_pool(&self) -> Result<bool, rayon::ThreadPoolBuildError> {
        if let Some(num_threads) = self.max_threads {
            rayon::ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .build_global()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn default_page_threshold() -> usize {
        1
    }
}

impl Default for ParallelPolicy {
    fn default() -> Self {
        Self {
            max_threads: None,
            page_threshold: Self::default_page_threshold(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_stays_sequential_for_single_page() {
        let policy = ParallelPolicy::default();
        assert!(policy.max_threads.is_none());
        assert_eq!(policy.page_threshold, 1);
    }

    #[test]
    fn test_install_without_max_threads_is_a_no_op() {
        let policy = ParallelPolicy::new().with_max_threads(None);
        assert_eq!(policy.install_global_thread_pool().ok(), Some(false));
    }
}
