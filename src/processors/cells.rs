//! Row-to-column cell assignment.

use crate::domain::{Row, StructuredRow};
use itertools::Itertools;

/// Resolves each row against the inferred column layout.
///
/// Every token is assigned to the column whose center is nearest to the
/// token's horizontal center (ties go to the lowest column index); texts
/// accumulate per column in the row's left-to-right order and are joined with
/// single spaces. With an empty layout, each row collapses to a single cell
/// holding the whole row text.
pub fn assign_rows_to_columns(rows: &[Row], col_centers: &[f32]) -> Vec<StructuredRow> {
    if col_centers.is_empty() {
        return rows
            .iter()
            .map(|row| StructuredRow {
                cells: vec![row.tokens.iter().map(|t| t.text.as_ref()).join(" ")],
                row_y: row.row_y(),
            })
            .collect();
    }

    rows.iter()
        .map(|row| {
            let mut accumulators: Vec<Vec<&str>> = vec![Vec::new(); col_centers.len()];
            for token in &row.tokens {
                let idx = nearest_column(token.bbox.center_x(), col_centers);
                accumulators[idx].push(token.text.as_ref());
            }
            StructuredRow {
                cells: accumulators
                    .into_iter()
                    .map(|texts| texts.join(" ").trim().to_string())
                    .collect(),
                row_y: row.row_y(),
            }
        })
        .collect()
}

/// Index of the column center closest to `cx`; lowest index wins ties.
fn nearest_column(cx: f32, col_centers: &[f32]) -> usize {
    let mut best = 0;
    let mut best_dist = f32::INFINITY;
    for (idx, &center) in col_centers.iter().enumerate() {
        let dist = (cx - center).abs();
        if dist < best_dist {
            best_dist = dist;
            best = idx;
        }
    }
    best
}
