//! Data model for bill layout reconstruction.
//!
//! Tokens, rows, and structured rows are scoped to one page's processing and
//! discarded once its line items are produced. Line items from all pages are
//! owned by the orchestration until merged; merged items and the totals
//! report form the final result owned by the caller.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Page type label attached to every per-page record.
pub const PAGE_TYPE_BILL_DETAIL: &str = "Bill Detail";

/// An axis-aligned bounding box in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge.
    pub x1: f32,
    /// Top edge.
    pub y1: f32,
    /// Right edge.
    pub x2: f32,
    /// Bottom edge.
    pub y2: f32,
}

impl BoundingBox {
    /// Creates a bounding box from corner coordinates.
    pub fn from_coords(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Returns the minimum x coordinate.
    #[inline]
    pub fn x_min(&self) -> f32 {
        self.x1
    }

    /// Returns the minimum y coordinate.
    #[inline]
    pub fn y_min(&self) -> f32 {
        self.y1
    }

    /// Returns the maximum x coordinate.
    #[inline]
    pub fn x_max(&self) -> f32 {
        self.x2
    }

    /// Returns the maximum y coordinate.
    #[inline]
    pub fn y_max(&self) -> f32 {
        self.y2
    }

    /// Horizontal center of the box.
    #[inline]
    pub fn center_x(&self) -> f32 {
        (self.x1 + self.x2) / 2.0
    }

    /// Vertical center of the box.
    #[inline]
    pub fn center_y(&self) -> f32 {
        (self.y1 + self.y2) / 2.0
    }
}

/// A single recognized text string with its bounding box and confidence,
/// produced by the recognition collaborator for one page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    /// The recognized text.
    pub text: Arc<str>,
    /// The bounding box of the recognized text.
    pub bbox: BoundingBox,
    /// Recognition confidence in `[0, 1]`.
    pub confidence: f32,
}

impl Token {
    /// Creates a new token.
    pub fn new(text: impl Into<Arc<str>>, bbox: BoundingBox, confidence: f32) -> Self {
        Self {
            text: text.into(),
            bbox,
            confidence,
        }
    }
}

/// Tokens judged to lie on the same horizontal print line, sorted left to
/// right. Rows produced by the grouper are never empty.
#[derive(Debug, Clone, Default)]
pub struct Row {
    /// The row's tokens in left-to-right order.
    pub tokens: Vec<Token>,
}

impl Row {
    /// Vertical position of the row: the vertical center of its leftmost
    /// token, or 0.0 for an empty row.
    pub fn row_y(&self) -> f32 {
        self.tokens
            .first()
            .map(|t| t.bbox.center_y())
            .unwrap_or(0.0)
    }
}

/// One row resolved against the inferred column layout: one cell string per
/// column (or a single joined cell when no layout could be inferred).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredRow {
    /// Cell text per column, left to right.
    pub cells: Vec<String>,
    /// Vertical position of the source row.
    pub row_y: f32,
}

/// One structured bill entry, the unit of output before deduplication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item description.
    pub item_name: String,
    /// Net amount, rounded to 2 decimals.
    pub item_amount: Option<f64>,
    /// Unit rate, rounded to 2 decimals, when a second numeric cell reads as
    /// a monetary value.
    pub item_rate: Option<f64>,
    /// Quantity, unrounded, when a second numeric cell reads as a small
    /// integer count.
    pub item_quantity: Option<f64>,
}

/// A deduplicated line item with the size of its originating cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedLineItem {
    /// Canonical item description (longest member name).
    pub item_name: String,
    /// Median member amount, rounded to 2 decimals.
    pub item_amount: Option<f64>,
    /// Discarded on merge.
    pub item_rate: Option<f64>,
    /// Discarded on merge.
    pub item_quantity: Option<f64>,
    /// Number of raw items merged into this entry.
    pub count: usize,
}

/// Extracted sum versus the printed invoice total, when one was detected.
///
/// `invoice_total` and `diff` are always both present or both absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalsReport {
    /// Sum of all merged item amounts, rounded to 2 decimals.
    pub sum_extracted: f64,
    /// Printed total detected in the page text, if any.
    pub invoice_total: Option<f64>,
    /// `invoice_total - sum_extracted`, rounded to 2 decimals.
    pub diff: Option<f64>,
}

/// Line items extracted from a single page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageLineItems {
    /// 1-based page number, as a string.
    pub page_no: String,
    /// Page type label; currently always [`PAGE_TYPE_BILL_DETAIL`].
    pub page_type: String,
    /// Line items extracted from this page, in reading order.
    pub bill_items: Vec<LineItem>,
}

/// The complete result of extracting a document, owned by the caller.
///
/// This is the sole data contract exposed to the calling service layer, which
/// wraps it unmodified in its own envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionOutcome {
    /// Per-page extraction records, in page order.
    pub pagewise_line_items: Vec<PageLineItems>,
    /// Deduplicated line items across all pages, in first-seen order.
    pub final_line_items: Vec<MergedLineItem>,
    /// Number of deduplicated line items.
    pub total_item_count: usize,
    /// Extracted sum reconciled against the printed total.
    pub totals: TotalsReport,
}

impl ExtractionOutcome {
    /// Returns the number of raw line items across all pages, before
    /// deduplication.
    pub fn raw_item_count(&self) -> usize {
        self.pagewise_line_items
            .iter()
            .map(|p| p.bill_items.len())
            .sum()
    }
}

impl fmt::Display for ExtractionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pages: {}", self.pagewise_line_items.len())?;
        writeln!(
            f,
            "Line items: {} raw, {} merged",
            self.raw_item_count(),
            self.final_line_items.len()
        )?;
        writeln!(f, "Sum extracted: {:.2}", self.totals.sum_extracted)?;
        match (self.totals.invoice_total, self.totals.diff) {
            (Some(total), Some(diff)) => {
                writeln!(f, "Invoice total: {total:.2} (diff: {diff:.2})")?;
            }
            _ => {
                writeln!(f, "Invoice total: not detected")?;
            }
        }
        Ok(())
    }
}
