//! Layout reconstruction and line-item extraction for scanned bills.
//!
//! This crate rebuilds tabular invoice line items from unordered, per-token
//! text-recognition results (text string + bounding box + confidence). It
//! infers row and column structure without a known table schema, interprets
//! each row into a structured line item, deduplicates items detected
//! redundantly across pages, and reconciles the extracted sum against a
//! printed total found in the page text.
//!
//! Document acquisition, page rasterization, and token recognition are
//! external concerns consumed through the traits in [`domain::adapters`].
//!
//! # Example
//!
//! ```
//! use bill_extract::{BillExtractorBuilder, BoundingBox, Token};
//!
//! let extractor = BillExtractorBuilder::new().build().expect("valid config");
//!
//! let page = vec![
//!     Token::new("Consultation Fee", BoundingBox::from_coords(10.0, 10.0, 160.0, 24.0), 0.98),
//!     Token::new("500.00", BoundingBox::from_coords(400.0, 10.0, 460.0, 24.0), 0.97),
//! ];
//!
//! let outcome = extractor.extract_token_pages(vec![page]);
//! assert_eq!(outcome.final_line_items.len(), 1);
//! assert_eq!(outcome.final_line_items[0].item_amount, Some(500.0));
//! ```

pub mod core;
pub mod domain;
pub mod extract;
pub mod processors;
pub mod utils;

pub use crate::core::{ExtractError, ExtractResult, ExtractionConfig, ParallelPolicy};
pub use crate::domain::{
    BoundingBox, ExtractionOutcome, LineItem, MergedLineItem, PageLineItems, Row, StructuredRow,
    Token, TotalsReport,
};
pub use crate::domain::adapters::{DocumentSource, LocalDocument, PageRasterizer, RecognitionEngine};
pub use crate::extract::{BillExtractor, BillExtractorBuilder};
