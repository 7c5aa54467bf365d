//! PNAD output generation.
//!
//! This crate writes the pipeline's results as UTF-8 CSV:
//!
//! - **Detail**: one row per labeled record, columns in a caller-defined
//!   order, with optional suppression flag columns
//! - **Summary**: one row per aggregation group, sorted by key
//!
//! Missing values are empty cells and integral numbers are written
//! without a trailing `.0`.

mod common;
mod detail;
mod error;
mod summary;

pub use common::{OutputColumn, ensure_parent_dir};
pub use detail::{DetailOptions, write_detail, write_detail_csv};
pub use error::{OutputError, Result};
pub use summary::{write_aggregate, write_aggregate_csv};
