//! Record filtering on integer fields.

use std::fmt;
use std::time::Instant;

use serde::Serialize;
use tracing::{info, info_span};

use pnad_model::LabeledRecord;

use crate::error::{Result, TransformError};

/// A condition a record must satisfy to be kept.
///
/// A record whose field is absent, missing, suppressed or not an integer
/// never matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// `min <= field <= max`.
    IntRange { field: String, min: i64, max: i64 },
    /// `field` is one of `values`.
    OneOf { field: String, values: Vec<i64> },
    /// Every inner predicate matches. An empty list matches everything.
    All(Vec<Predicate>),
}

impl Predicate {
    pub fn int_range(field: impl Into<String>, min: i64, max: i64) -> Self {
        Self::IntRange {
            field: field.into(),
            min,
            max,
        }
    }

    pub fn one_of(field: impl Into<String>, values: impl IntoIterator<Item = i64>) -> Self {
        Self::OneOf {
            field: field.into(),
            values: values.into_iter().collect(),
        }
    }

    pub fn matches(&self, record: &LabeledRecord) -> bool {
        match self {
            Self::IntRange { field, min, max } => record
                .int(field)
                .is_some_and(|v| (*min..=*max).contains(&v)),
            Self::OneOf { field, values } => {
                record.int(field).is_some_and(|v| values.contains(&v))
            }
            Self::All(predicates) => predicates.iter().all(|p| p.matches(record)),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IntRange { field, min, max } => write!(f, "{field} in [{min}, {max}]"),
            Self::OneOf { field, values } => {
                let values: Vec<String> = values.iter().map(i64::to_string).collect();
                write!(f, "{field} in {{{}}}", values.join(", "))
            }
            Self::All(predicates) if predicates.is_empty() => write!(f, "true"),
            Self::All(predicates) => {
                let parts: Vec<String> = predicates.iter().map(ToString::to_string).collect();
                write!(f, "{}", parts.join(" and "))
            }
        }
    }
}

/// Records that passed the filter, and how many did not.
#[derive(Debug, Clone, Default)]
pub struct FilterOutcome {
    pub kept: Vec<LabeledRecord>,
    pub excluded: usize,
}

/// Keeps the records matching `predicate`, in input order.
pub fn filter_records(records: Vec<LabeledRecord>, predicate: &Predicate) -> FilterOutcome {
    let span = info_span!("filter", predicate = %predicate, records = records.len());
    let _guard = span.enter();
    let start = Instant::now();

    let total = records.len();
    let kept: Vec<LabeledRecord> = records
        .into_iter()
        .filter(|record| predicate.matches(record))
        .collect();
    let excluded = total - kept.len();

    info!(
        kept = kept.len(),
        excluded,
        duration_ms = start.elapsed().as_millis(),
        "filter complete"
    );
    FilterOutcome { kept, excluded }
}

/// Re-checks filtered records against the predicate.
///
/// Any survivor outside the predicate is an upstream defect and aborts the
/// run with [`TransformError::FilterInvariant`].
pub fn verify(records: &[LabeledRecord], predicate: &Predicate) -> Result<()> {
    let violations = records.iter().filter(|r| !predicate.matches(r)).count();
    if violations > 0 {
        return Err(TransformError::FilterInvariant {
            predicate: predicate.to_string(),
            violations,
            total: records.len(),
        });
    }
    Ok(())
}
