//! Column estimation from token horizontal centers.
//!
//! No table grid is assumed: column positions are inferred by 1-D clustering
//! of every token's horizontal center across all rows of a page. The cluster
//! count target is derived from the median row length, so pages whose rows
//! mostly carry N tokens tend to produce N+1 candidate columns (description
//! text often splits into multiple tokens).

use crate::domain::Row;
use itertools::Itertools;

/// Estimates column center positions for one page.
///
/// Returns at most `max_cols` strictly increasing centers; an empty layout
/// when the page has no tokens.
pub fn estimate_column_centers(rows: &[Row], max_cols: usize) -> Vec<f32> {
    let centers: Vec<f32> = rows
        .iter()
        .flat_map(|row| row.tokens.iter().map(|t| t.bbox.center_x()))
        .collect();
    if centers.is_empty() {
        return Vec::new();
    }

    let target = ((median_row_len(rows).trunc() as usize) + 1)
        .max(2)
        .min(max_cols);

    if centers.len() < target {
        // Degenerate page: fewer tokens than clusters.
        fallback_centers(&centers, target)
    } else {
        agglomerate(&centers, target)
    }
}

/// Median token count per row; mean of the two middles for an even count.
fn median_row_len(rows: &[Row]) -> f64 {
    let lens: Vec<usize> = rows
        .iter()
        .map(|r| r.tokens.len())
        .sorted_unstable()
        .collect();
    let n = lens.len();
    if n % 2 == 1 {
        lens[n / 2] as f64
    } else {
        (lens[n / 2 - 1] + lens[n / 2]) as f64 / 2.0
    }
}

/// Agglomerative 1-D clustering over the sorted centers.
///
/// Starts from singleton clusters and repeatedly merges the adjacent pair
/// with the closest means until `target` clusters remain. Adjacent-only
/// merging keeps every cluster a contiguous interval of the sorted scalars,
/// so the emitted means are non-decreasing; equal means are coalesced to keep
/// the layout strictly increasing.
fn agglomerate(centers: &[f32], target: usize) -> Vec<f32> {
    let sorted: Vec<f64> = centers
        .iter()
        .map(|&c| c as f64)
        .sorted_by(f64::total_cmp)
        .collect();

    // (sum, count) per cluster
    let mut clusters: Vec<(f64, usize)> = sorted.into_iter().map(|c| (c, 1)).collect();
    while clusters.len() > target {
        let mut best = 0;
        let mut best_gap = f64::INFINITY;
        for i in 0..clusters.len() - 1 {
            let gap = mean(clusters[i + 1]) - mean(clusters[i]);
            if gap < best_gap {
                best_gap = gap;
                best = i;
            }
        }
        let (sum, count) = clusters.remove(best + 1);
        clusters[best].0 += sum;
        clusters[best].1 += count;
    }

    let mut out: Vec<f32> = Vec::with_capacity(clusters.len());
    for cluster in clusters {
        let m = mean(cluster) as f32;
        if out.last().is_none_or(|&last| m > last) {
            out.push(m);
        }
    }
    out
}

#[inline]
fn mean((sum, count): (f64, usize)) -> f64 {
    sum / count as f64
}

/// Fallback for degenerate input: deduplicate rounded centers and, when more
/// unique values remain than the target, subsample at a stride.
fn fallback_centers(centers: &[f32], target: usize) -> Vec<f32> {
    let mut uniq: Vec<i64> = centers.iter().map(|&c| c.round() as i64).collect();
    uniq.sort_unstable();
    uniq.dedup();
    if uniq.len() > target {
        let step = (uniq.len() / target).max(1);
        uniq = uniq.into_iter().step_by(step).take(target).collect();
    }
    uniq.into_iter().map(|v| v as f32).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BoundingBox, Token};

    fn row_at(y: f32, xs: &[f32]) -> Row {
        Row {
            tokens: xs
                .iter()
                .map(|&x| {
                    Token::new(
                        "t",
                        BoundingBox::from_coords(x - 5.0, y, x + 5.0, y + 10.0),
                        0.9,
                    )
                })
                .collect(),
        }
    }

    #[test]
    fn test_no_tokens_yields_empty_layout() {
        assert!(estimate_column_centers(&[], 6).is_empty());
        assert!(estimate_column_centers(&[Row::default()], 6).is_empty());
    }

    #[test]
    fn test_recovers_well_separated_columns() {
        // Three rows of two tokens each, near x=100 and x=500.
        let rows = vec![
            row_at(10.0, &[100.0, 500.0]),
            row_at(40.0, &[102.0, 498.0]),
            row_at(70.0, &[98.0, 502.0]),
        ];
        let centers = estimate_column_centers(&rows, 6);
        // median row length 2 -> target 3, but the data only supports the
        // strictly-increasing means the clustering produces
        assert!(centers.len() <= 6);
        assert!(centers.iter().any(|&c| (c - 100.0).abs() < 10.0));
        assert!(centers.iter().any(|&c| (c - 500.0).abs() < 10.0));
    }

    #[test]
    fn test_centers_are_strictly_increasing_and_bounded() {
        let rows = vec![
            row_at(10.0, &[50.0, 180.0, 300.0, 420.0]),
            row_at(40.0, &[52.0, 182.0, 305.0, 418.0]),
            row_at(70.0, &[48.0, 179.0, 298.0, 421.0]),
        ];
        let max_cols = 6;
        let centers = estimate_column_centers(&rows, max_cols);
        assert!(!centers.is_empty());
        assert!(centers.len() <= max_cols);
        for pair in centers.windows(2) {
            assert!(pair[0] < pair[1], "centers must strictly increase");
        }
    }

    #[test]
    fn test_max_cols_caps_cluster_count() {
        // Eight distinct x positions but max_cols of 3.
        let xs: Vec<f32> = (0..8).map(|i| i as f32 * 120.0 + 40.0).collect();
        let rows = vec![row_at(10.0, &xs), row_at(40.0, &xs)];
        let centers = estimate_column_centers(&rows, 3);
        assert!(centers.len() <= 3);
    }

    #[test]
    fn test_single_token_page_uses_fallback() {
        // One token, target clamps to 2 > 1 center available.
        let rows = vec![row_at(10.0, &[250.0])];
        let centers = estimate_column_centers(&rows, 6);
        assert_eq!(centers, vec![250.0]);
    }

    #[test]
    fn test_duplicate_positions_collapse() {
        // Every token at the same x: one strictly-increasing center.
        let rows = vec![
            row_at(10.0, &[200.0, 200.0, 200.0]),
            row_at(40.0, &[200.0, 200.0, 200.0]),
        ];
        let centers = estimate_column_centers(&rows, 6);
        assert_eq!(centers, vec![200.0]);
    }

    #[test]
    fn test_fallback_subsamples_to_target() {
        let centers: Vec<f32> = (0..10).map(|i| i as f32 * 10.0).collect();
        let out = fallback_centers(&centers, 3);
        assert_eq!(out.len(), 3);
        for pair in out.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_median_row_len_even_count_averages_middles() {
        let rows = vec![row_at(0.0, &[1.0]), row_at(20.0, &[1.0, 2.0, 3.0, 4.0])];
        assert_eq!(median_row_len(&rows), 2.5);
    }
}
