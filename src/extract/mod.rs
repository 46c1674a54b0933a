//! Semantic extraction stages and the document-level pipeline.
//!
//! [`line_items`] interprets structured rows into bill entries, [`dedupe`]
//! clusters duplicates detected across pages, [`totals`] reconciles the
//! extracted sum against the printed total, and [`pipeline`] wires the whole
//! thing together per document.

pub mod dedupe;
pub mod line_items;
pub mod pipeline;
pub mod totals;

pub use dedupe::dedupe_items;
pub use line_items::{extract_line_items, line_item_from_cells};
pub use pipeline::{BillExtractor, BillExtractorBuilder};
pub use totals::reconcile_totals;
