//! # Stage Definition: Document Extraction Orchestration
//!
//! This service is considered "Done" when it fulfills the following contract:
//!
//! - **Inputs**: per-page token lists (or page images plus a
//!   [`RecognitionEngine`] handle, or the full collaborator chain).
//! - **Outputs**: an [`ExtractionOutcome`] with per-page records, merged line
//!   items, and a totals report.
//! - **Logging**: traces per-page layout statistics and warns on degraded
//!   pages.
//! - **Error Behavior**: input resolution and rasterization failures abort
//!   the extraction; a recognition failure degrades only its own page.
//! - **Invariants**:
//!     - Pages may be processed in parallel, but line items are reassembled
//!       in original page order before deduplication runs.
//!     - Deduplication and totals reconciliation run single-threaded over the
//!       complete, ordered item list.

use crate::core::config::{ExtractionConfig, ParallelPolicy};
use crate::core::errors::ExtractError;
use crate::domain::adapters::{DocumentSource, PageRasterizer, RecognitionEngine};
use crate::domain::{
    ExtractionOutcome, LineItem, PageLineItems, Token, PAGE_TYPE_BILL_DETAIL,
};
use crate::extract::dedupe::dedupe_items;
use crate::extract::line_items::extract_line_items;
use crate::extract::totals::reconcile_totals;
use crate::processors::cells::assign_rows_to_columns;
use crate::processors::columns::estimate_column_centers;
use crate::processors::rows::group_tokens_into_rows;
use image::RgbImage;
use itertools::Itertools;
use rayon::prelude::*;

/// Line items and the raw text blob produced from one page.
#[derive(Debug, Clone)]
struct PageExtraction {
    items: Vec<LineItem>,
    text_blob: String,
}

/// Builder for constructing a [`BillExtractor`].
///
/// # Example
///
/// ```
/// use bill_extract::BillExtractorBuilder;
///
/// let extractor = BillExtractorBuilder::new()
///     .y_thresh(15.0)
///     .max_cols(5)
///     .build()
///     .expect("valid config");
/// # let _ = extractor;
/// ```
#[derive(Debug, Clone, Default)]
pub struct BillExtractorBuilder {
    config: ExtractionConfig,
    parallel: ParallelPolicy,
}

impl BillExtractorBuilder {
    /// Creates a builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole extraction configuration.
    pub fn extraction_config(mut self, config: ExtractionConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the row grouping tolerance in pixels.
    pub fn y_thresh(mut self, y_thresh: f32) -> Self {
        self.config.y_thresh = y_thresh;
        self
    }

    /// Sets the maximum number of inferred columns.
    pub fn max_cols(mut self, max_cols: usize) -> Self {
        self.config.max_cols = max_cols;
        self
    }

    /// Sets the deduplication name similarity threshold (0-100).
    pub fn name_threshold(mut self, name_threshold: f64) -> Self {
        self.config.name_threshold = name_threshold;
        self
    }

    /// Sets the deduplication amount tolerance.
    pub fn amount_tol(mut self, amount_tol: f64) -> Self {
        self.config.amount_tol = amount_tol;
        self
    }

    /// Sets the parallel processing policy.
    pub fn parallel_policy(mut self, policy: ParallelPolicy) -> Self {
        self.parallel = policy;
        self
    }

    /// Validates the configuration and builds the extractor.
    pub fn build(self) -> Result<BillExtractor, ExtractError> {
        self.config.validate()?;
        Ok(BillExtractor {
            config: self.config,
            parallel: self.parallel,
        })
    }
}

/// The layout reconstruction and line-item extraction engine.
///
/// Stateless between documents: every invocation is independent and all
/// intermediate structures are scoped to one page's processing.
#[derive(Debug, Clone)]
pub struct BillExtractor {
    config: ExtractionConfig,
    parallel: ParallelPolicy,
}

impl BillExtractor {
    /// Creates an extractor from a validated configuration.
    pub fn new(config: ExtractionConfig) -> Result<Self, ExtractError> {
        config.validate()?;
        Ok(Self {
            config,
            parallel: ParallelPolicy::default(),
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extracts line items from one page's tokens (stages: rows, columns,
    /// cells, items).
    pub fn extract_page(&self, tokens: Vec<Token>) -> Vec<LineItem> {
        self.process_page(0, tokens).items
    }

    /// Runs the full pipeline over already-recognized token pages.
    ///
    /// Pages beyond the parallel policy's threshold are processed on worker
    /// threads; results are reassembled in page order before the
    /// order-sensitive deduplication pass.
    pub fn extract_token_pages(&self, pages: Vec<Vec<Token>>) -> ExtractionOutcome {
        let extractions: Vec<PageExtraction> = if pages.len() > self.parallel.page_threshold {
            pages
                .into_par_iter()
                .enumerate()
                .map(|(index, tokens)| self.process_page(index, tokens))
                .collect()
        } else {
            pages
                .into_iter()
                .enumerate()
                .map(|(index, tokens)| self.process_page(index, tokens))
                .collect()
        };
        self.assemble(extractions)
    }

    /// Recognizes and extracts every page of a document.
    ///
    /// The recognition engine is a long-lived handle owned by the caller; a
    /// failure on one page downgrades that page to zero line items and an
    /// empty text blob instead of aborting the document.
    pub fn extract_document(
        &self,
        engine: &dyn RecognitionEngine,
        pages: &[RgbImage],
    ) -> ExtractionOutcome {
        let token_pages: Vec<Vec<Token>> = pages
            .iter()
            .enumerate()
            .map(|(index, page)| match engine.recognize(page) {
                Ok(tokens) => tokens,
                Err(error) => {
                    tracing::warn!(
                        target: "pipeline",
                        page = index + 1,
                        error = %error,
                        "Recognition failed; page yields no line items"
                    );
                    Vec::new()
                }
            })
            .collect();
        self.extract_token_pages(token_pages)
    }

    /// Resolves, rasterizes, and extracts a document end to end.
    ///
    /// Resolution and rasterization failures are fatal; recognition degrades
    /// per page as in [`BillExtractor::extract_document`].
    pub fn extract_from_source(
        &self,
        source: &dyn DocumentSource,
        rasterizer: &dyn PageRasterizer,
        engine: &dyn RecognitionEngine,
    ) -> Result<ExtractionOutcome, ExtractError> {
        let path = source.resolve()?;
        tracing::info!(target: "pipeline", path = %path.display(), "Resolved document");
        let pages = rasterizer.rasterize(&path)?;
        tracing::info!(target: "pipeline", pages = pages.len(), "Rasterized document");
        Ok(self.extract_document(engine, &pages))
    }

    /// Stages 1-4 for a single page.
    fn process_page(&self, index: usize, tokens: Vec<Token>) -> PageExtraction {
        let text_blob = page_text_blob(&tokens);
        let rows = group_tokens_into_rows(tokens, self.config.y_thresh);
        let col_centers = estimate_column_centers(&rows, self.config.max_cols);
        let structured = assign_rows_to_columns(&rows, &col_centers);
        let items = extract_line_items(&structured);
        tracing::debug!(
            target: "pipeline",
            page = index + 1,
            rows = rows.len(),
            columns = col_centers.len(),
            items = items.len(),
            "Parsed page layout"
        );
        PageExtraction { items, text_blob }
    }

    /// Stages 5-6 over the reassembled per-page results.
    fn assemble(&self, extractions: Vec<PageExtraction>) -> ExtractionOutcome {
        let mut pagewise_line_items = Vec::with_capacity(extractions.len());
        let mut aggregated: Vec<LineItem> = Vec::new();
        let mut page_texts = Vec::with_capacity(extractions.len());

        for (index, extraction) in extractions.into_iter().enumerate() {
            pagewise_line_items.push(PageLineItems {
                page_no: (index + 1).to_string(),
                page_type: PAGE_TYPE_BILL_DETAIL.to_string(),
                bill_items: extraction.items.clone(),
            });
            aggregated.extend(extraction.items);
            page_texts.push(extraction.text_blob);
        }

        let final_line_items = dedupe_items(
            &aggregated,
            self.config.name_threshold,
            self.config.amount_tol,
        );
        let totals = reconcile_totals(&final_line_items, &page_texts);
        let total_item_count = final_line_items.len();

        ExtractionOutcome {
            pagewise_line_items,
            final_line_items,
            total_item_count,
            totals,
        }
    }
}

/// One page's tokens joined by newline, ordered top to bottom. Used for the
/// printed-total scan, independent of the column-structured extraction.
fn page_text_blob(tokens: &[Token]) -> String {
    tokens
        .iter()
        .sorted_by(|a, b| a.bbox.y_min().total_cmp(&b.bbox.y_min()))
        .map(|t| t.text.as_ref())
        .join("\n")
}
