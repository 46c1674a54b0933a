//! Totals reconciliation against the printed invoice total.

use crate::domain::{MergedLineItem, TotalsReport};
use crate::processors::amounts::round2;
use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a printed total label followed by a numeric value, e.g.
/// "Grand Total: 8,250.00".
static TOTAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:final\s*total|grand\s*total|total\s*payable|net\s*amount)[\s:]*([0-9.,]+)")
        .expect("totals pattern")
});

/// Sums the merged item amounts and compares against the printed total.
///
/// The printed total is searched in each page's raw text blob, in page order;
/// the first parseable match wins and scanning stops. `invoice_total` and
/// `diff` are always both present or both absent.
pub fn reconcile_totals(final_items: &[MergedLineItem], pages_text: &[String]) -> TotalsReport {
    let sum_extracted = round2(
        final_items
            .iter()
            .map(|item| item.item_amount.unwrap_or(0.0))
            .sum(),
    );

    let invoice_total = detect_invoice_total(pages_text).map(round2);
    let diff = invoice_total.map(|total| round2(total - sum_extracted));

    if invoice_total.is_none() {
        tracing::debug!(target: "extract", "No printed total detected in page text");
    }

    TotalsReport {
        sum_extracted,
        invoice_total,
        diff,
    }
}

/// First parseable labeled total across the pages, if any.
fn detect_invoice_total(pages_text: &[String]) -> Option<f64> {
    for text in pages_text {
        for caps in TOTAL_RE.captures_iter(text) {
            let raw = caps[1].replace(',', "");
            if let Ok(value) = raw.trim().parse::<f64>() {
                return Some(value);
            }
        }
    }
    None
}
