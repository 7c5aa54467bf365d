//! Record normalization.
//!
//! Applies a [`FieldManifest`] to raw records: each expected source field is
//! coerced according to its [`FieldKind`] and stored under its canonical
//! name. Fields the source did not provide stay absent.

use std::collections::BTreeMap;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, info_span};

use pnad_model::{FieldKind, FieldManifest, NormalizedRecord, RawRecord, RawValue, Value};

use crate::normalization::{is_suppression_sentinel, parse_code, parse_measure};

/// Counters collected while normalizing a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeStats {
    pub records: usize,
    /// Values that could not be coerced, per canonical field.
    pub unparseable: BTreeMap<String, usize>,
    /// Disclosure-control sentinels, per canonical field.
    pub suppressed: BTreeMap<String, usize>,
}

impl NormalizeStats {
    pub fn total_unparseable(&self) -> usize {
        self.unparseable.values().sum()
    }

    pub fn total_suppressed(&self) -> usize {
        self.suppressed.values().sum()
    }
}

/// Output of [`normalize_records`].
#[derive(Debug, Clone, Default)]
pub struct NormalizeOutcome {
    pub records: Vec<NormalizedRecord>,
    pub stats: NormalizeStats,
}

/// Normalizes a batch of raw records, preserving order.
pub fn normalize_records(records: &[RawRecord], manifest: &FieldManifest) -> NormalizeOutcome {
    let span = info_span!("normalize", records = records.len(), fields = manifest.len());
    let _guard = span.enter();
    let start = Instant::now();

    let mut stats = NormalizeStats::default();
    let records: Vec<NormalizedRecord> = records
        .iter()
        .map(|record| normalize_record(record, manifest, &mut stats))
        .collect();

    info!(
        records = stats.records,
        unparseable = stats.total_unparseable(),
        suppressed = stats.total_suppressed(),
        duration_ms = start.elapsed().as_millis(),
        "normalization complete"
    );
    NormalizeOutcome { records, stats }
}

/// Normalizes one raw record.
pub fn normalize_record(
    record: &RawRecord,
    manifest: &FieldManifest,
    stats: &mut NormalizeStats,
) -> NormalizedRecord {
    stats.records += 1;
    let mut fields = BTreeMap::new();
    for spec in manifest.fields() {
        let Some(raw) = record.get(&spec.source) else {
            continue;
        };
        let value = coerce(raw, spec.kind);
        match classify(raw, &value) {
            Outcome::Unparseable => {
                debug!(
                    record = %record.id(),
                    field = %spec.canonical,
                    "unparseable value treated as missing"
                );
                *stats.unparseable.entry(spec.canonical.clone()).or_default() += 1;
            }
            Outcome::Suppressed => {
                *stats.suppressed.entry(spec.canonical.clone()).or_default() += 1;
            }
            Outcome::Clean => {}
        }
        fields.insert(spec.canonical.clone(), value);
    }
    NormalizedRecord::new(record.id(), fields)
}

/// Coerces one raw value. Never fails.
pub fn coerce(raw: &RawValue, kind: FieldKind) -> Value {
    match (raw, kind) {
        (RawValue::Missing, _) => Value::Missing,
        (RawValue::Int(v), FieldKind::IntegerCode) => Value::Int(*v),
        (RawValue::Int(v), FieldKind::FloatMeasure) => Value::Float(*v as f64),
        (RawValue::Int(v), FieldKind::Passthrough) => Value::Text(v.to_string()),
        (RawValue::Text(text), FieldKind::Passthrough) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                Value::Missing
            } else {
                Value::Text(trimmed.to_string())
            }
        }
        (RawValue::Text(text), FieldKind::IntegerCode) => match parse_code(text) {
            Some(code) => Value::Int(code),
            None => unparsed(text),
        },
        (RawValue::Text(text), FieldKind::FloatMeasure) => match parse_measure(text) {
            Some(v) => Value::Float(v),
            None => unparsed(text),
        },
    }
}

fn unparsed(text: &str) -> Value {
    if is_suppression_sentinel(text) {
        Value::Suppressed
    } else {
        Value::Missing
    }
}

enum Outcome {
    Clean,
    Suppressed,
    Unparseable,
}

fn classify(raw: &RawValue, value: &Value) -> Outcome {
    match (raw, value) {
        (_, Value::Suppressed) => Outcome::Suppressed,
        (RawValue::Text(text), Value::Missing) if !text.trim().is_empty() => Outcome::Unparseable,
        _ => Outcome::Clean,
    }
}
