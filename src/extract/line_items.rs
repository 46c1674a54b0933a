//! # Stage Definition: Line-Item Interpretation
//!
//! This stage is considered "Done" when it fulfills the following contract:
//!
//! - **Inputs**: one [`StructuredRow`]'s cells.
//! - **Outputs**: at most one [`LineItem`] per row.
//! - **Error Behavior**: rows that cannot confidently yield a name + amount
//!   pair are dropped silently as non-item noise (headers, footers, rules).
//! - **Invariants**:
//!     - The amount always comes from the rightmost amount-bearing cell.
//!     - A second amount-bearing cell classifies as quantity only when it is
//!       integer-valued (within 1e-6) and at most 20, otherwise as rate.
//!     - Emitted amounts and rates are rounded to 2 decimals; quantities are
//!       left unrounded.

use crate::domain::{LineItem, StructuredRow};
use crate::processors::amounts::{clean_amount_str, contains_amount, round2};
use itertools::Itertools;

/// Largest value the second numeric cell may take to read as a quantity.
/// Heuristic: bills rarely list more than 20 of one thing, while rates below
/// 20 currency units do occur and will be misread. Kept as calibrated.
const QUANTITY_MAX: f64 = 20.0;

/// Interprets all structured rows of a page, dropping non-item rows.
pub fn extract_line_items(rows: &[StructuredRow]) -> Vec<LineItem> {
    rows.iter()
        .filter_map(|row| {
            let item = line_item_from_cells(&row.cells);
            if item.is_none() {
                tracing::trace!(
                    target: "extract",
                    row_y = row.row_y,
                    "Row dropped as non-item noise"
                );
            }
            item
        })
        .collect()
}

/// Interprets one row's cells into a line item.
///
/// Returns `None` when the row carries no amount-bearing cell, when the
/// amount cannot be parsed, or when no name survives the fallbacks.
pub fn line_item_from_cells(cells: &[String]) -> Option<LineItem> {
    if cells.is_empty() {
        return None;
    }

    let numeric_cols: Vec<usize> = cells
        .iter()
        .enumerate()
        .filter(|(_, cell)| contains_amount(cell))
        .map(|(idx, _)| idx)
        .collect();
    // Rows with no numeric cell are headers/footers, not items.
    let amount_idx = *numeric_cols.last()?;
    let item_amount = clean_amount_str(&cells[amount_idx]);

    let mut item_rate = None;
    let mut item_quantity = None;
    if numeric_cols.len() >= 2 {
        let sec_idx = numeric_cols[numeric_cols.len() - 2];
        if let Some(sec_val) = clean_amount_str(&cells[sec_idx]) {
            if (sec_val - sec_val.round()).abs() < 1e-6 && sec_val <= QUANTITY_MAX {
                item_quantity = Some(sec_val);
            } else {
                item_rate = Some(sec_val);
            }
        }
    }

    // Description: cells strictly before the first numeric cell. Empty cells
    // are skipped without terminating the scan.
    let mut desc_parts: Vec<&str> = Vec::new();
    for cell in cells {
        if !cell.is_empty() && !contains_amount(cell) {
            desc_parts.push(cell);
        } else if contains_amount(cell) {
            break;
        }
    }
    let mut item_name = desc_parts.join(" ").trim().to_string();
    if item_name.is_empty() {
        item_name = cells
            .iter()
            .filter(|cell| !contains_amount(cell))
            .join(" ")
            .trim()
            .to_string();
    }
    if item_name.is_empty() {
        item_name = cells[0].clone();
    }

    let item_amount = item_amount?;
    if item_name.is_empty() {
        return None;
    }

    Some(LineItem {
        item_name,
        item_amount: Some(round2(item_amount)),
        item_rate: item_rate.map(round2),
        item_quantity,
    })
}
