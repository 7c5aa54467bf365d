//! Shared data model for the PNAD Contínua labeling pipeline.
//!
//! Records move through the pipeline as a chain of distinct types, each stage
//! producing a new value instead of mutating the previous one:
//!
//! ```text
//! RawRecord ──normalize──▶ NormalizedRecord ──label──▶ LabeledRecord ──aggregate──▶ AggregatedRecord
//! ```
//!
//! - [`RawRecord`]: fields exactly as the data source delivered them.
//! - [`NormalizedRecord`]: typed values under canonical field names.
//! - [`LabeledRecord`]: normalized fields plus one `<field>_label` per code.
//! - [`AggregatedRecord`]: one group-key tuple with its summed measure.
//!
//! [`FieldManifest`] declares which source fields a workflow expects and how
//! each one is coerced.

#![deny(unsafe_code)]

pub mod error;
pub mod ids;
pub mod manifest;
pub mod record;
pub mod value;

pub use error::{ModelError, Result};
pub use ids::RecordId;
pub use manifest::{FieldKind, FieldManifest, FieldSpec, SchemaReport};
pub use record::{
    AggregateTable, AggregatedRecord, GroupValue, LabeledRecord, MeasureValue, NormalizedRecord,
    RawRecord,
};
pub use value::{RawValue, Value, format_numeric};
