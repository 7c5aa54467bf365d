//! Per-value coercion functions.

pub mod numeric;

pub use numeric::{is_suppression_sentinel, parse_code, parse_measure};
