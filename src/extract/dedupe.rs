//! Cross-page duplicate clustering.
//!
//! Multi-page bills often repeat line items (carried-forward tables, summary
//! pages). Items are clustered greedily in first-seen order: each unassigned
//! item seeds a cluster and later unassigned items join when their normalized
//! name is similar enough to the seed's AND their amounts are numerically
//! close to the seed's. Membership is always evaluated against the seed, not
//! against other members, so clusters never chain transitively.

use crate::domain::{LineItem, MergedLineItem};
use crate::processors::amounts::round2;
use itertools::Itertools;

/// Relative amount tolerance when comparing candidate duplicates.
const AMOUNT_REL_TOL: f64 = 1e-2;

/// Clusters duplicate items and merges each cluster into one entry.
///
/// Every input item lands in exactly one output cluster; output order follows
/// the first-seen order of each cluster's seed.
///
/// # Arguments
///
/// * `items` - line items from all pages, in page order
/// * `name_threshold` - minimum name similarity on a 0-100 scale
/// * `amount_tol` - absolute amount tolerance in currency units
pub fn dedupe_items(
    items: &[LineItem],
    name_threshold: f64,
    amount_tol: f64,
) -> Vec<MergedLineItem> {
    let mut used = vec![false; items.len()];
    let mut merged = Vec::new();

    for i in 0..items.len() {
        if used[i] {
            continue;
        }
        used[i] = true;
        let seed_name = normalize_name(&items[i].item_name);
        let seed_amount = items[i].item_amount.unwrap_or(0.0);

        let mut cluster: Vec<&LineItem> = vec![&items[i]];
        for j in (i + 1)..items.len() {
            if used[j] {
                continue;
            }
            let name_score =
                token_sort_ratio(&seed_name, &normalize_name(&items[j].item_name));
            let amount_ok = amounts_close(
                seed_amount,
                items[j].item_amount.unwrap_or(0.0),
                amount_tol,
            );
            if name_score >= name_threshold && amount_ok {
                used[j] = true;
                cluster.push(&items[j]);
            }
        }
        merged.push(merge_cluster(&cluster));
    }
    merged
}

/// Canonical name form for similarity scoring: lower-cased, punctuation
/// replaced by spaces, whitespace runs collapsed.
pub fn normalize_name(name: &str) -> String {
    let mut cleaned = String::with_capacity(name.len());
    for ch in name.to_lowercase().chars() {
        if ch.is_alphanumeric() || ch.is_whitespace() {
            cleaned.push(ch);
        } else {
            cleaned.push(' ');
        }
    }
    cleaned.split_whitespace().join(" ")
}

/// Token-order-insensitive similarity on a 0-100 scale.
///
/// Both names are split into words, the words sorted and rejoined, and the
/// normalized Levenshtein similarity of the rejoined strings scaled to 100.
fn token_sort_ratio(a: &str, b: &str) -> f64 {
    let sorted_a = a.split_whitespace().sorted().join(" ");
    let sorted_b = b.split_whitespace().sorted().join(" ");
    strsim::normalized_levenshtein(&sorted_a, &sorted_b) * 100.0
}

/// Combined relative (1%) and absolute tolerance comparison.
fn amounts_close(a: f64, b: f64, abs_tol: f64) -> bool {
    (a - b).abs() <= f64::max(AMOUNT_REL_TOL * f64::max(a.abs(), b.abs()), abs_tol)
}

/// Merge policy: longest member name (first of ties), median member amount
/// (lower of the two middles for even-sized clusters) rounded to 2 decimals;
/// rate and quantity do not survive the merge.
fn merge_cluster(cluster: &[&LineItem]) -> MergedLineItem {
    let mut canonical = cluster[0].item_name.as_str();
    for item in &cluster[1..] {
        if item.item_name.len() > canonical.len() {
            canonical = &item.item_name;
        }
    }

    let amounts: Vec<f64> = cluster
        .iter()
        .map(|item| item.item_amount.unwrap_or(0.0))
        .sorted_by(f64::total_cmp)
        .collect();
    let median = amounts[(amounts.len() - 1) / 2];

    MergedLineItem {
        item_name: canonical.to_string(),
        item_amount: Some(round2(median)),
        item_rate: None,
        item_quantity: None,
        count: cluster.len(),
    }
}
