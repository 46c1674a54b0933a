//! Layout reconstruction processors.
//!
//! These are the unsupervised structure-inference stages: grouping unordered
//! tokens into rows, estimating column centers across a page, resolving each
//! row against the column layout, and detecting/parsing monetary amounts.

pub mod amounts;
pub mod cells;
pub mod columns;
pub mod rows;

pub use amounts::{clean_amount_str, contains_amount, round2};
pub use cells::assign_rows_to_columns;
pub use columns::estimate_column_centers;
pub use rows::group_tokens_into_rows;
