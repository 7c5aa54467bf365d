//! PNAD transformation stages.
//!
//! - **label**: attach dictionary labels to code fields and resolve summable
//!   measures, keeping suppression visible
//! - **filter**: keep records matching a [`Predicate`] and verify the result
//! - **aggregate**: group by a key tuple and sum a measure, sorted by key
//!
//! Every stage takes its input by reference or by value and returns new
//! records; nothing is mutated in place.

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod label;

pub use aggregate::{GroupKey, aggregate, latest_year_slice};
pub use error::{Result, TransformError};
pub use filter::{FilterOutcome, Predicate, filter_records, verify};
pub use label::{
    LabelOutcome, LabelPlan, LabelRule, LabelStats, MeasureRule, label_record, label_records,
};
