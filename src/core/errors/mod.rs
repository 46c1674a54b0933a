//! Error handling for the extraction pipeline.

mod types;

pub use types::{ExtractError, ExtractResult};
