//! Dictionary labeling.
//!
//! A [`LabelPlan`] lists which code fields get a label and which measures
//! are summable. Labeling keeps every normalized field, adds one label per
//! rule and resolves each declared measure to a [`MeasureValue`].
//!
//! Unmapped codes never drop a record: they receive the dictionary fallback
//! and are counted in [`LabelStats`].

use std::collections::BTreeMap;
use std::time::Instant;

use serde::Serialize;
use tracing::{info, info_span, warn};

use pnad_model::{LabeledRecord, MeasureValue, NormalizedRecord, Value};
use pnad_standards::{CodeDictionary, LabelLookup};

/// Attach `label_field` to records carrying `code_field`.
#[derive(Debug, Clone)]
pub struct LabelRule {
    pub code_field: String,
    pub label_field: String,
    pub dictionary: &'static CodeDictionary,
}

/// A summable measure and the factor applied to reported values.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasureRule {
    pub field: String,
    pub scale: f64,
    /// Head counts: scaled values are rounded to whole numbers.
    pub whole: bool,
}

/// Ordered labeling rules for one workflow.
#[derive(Debug, Clone, Default)]
pub struct LabelPlan {
    rules: Vec<LabelRule>,
    measures: Vec<MeasureRule>,
}

impl LabelPlan {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_rule(
        mut self,
        code_field: impl Into<String>,
        label_field: impl Into<String>,
        dictionary: &'static CodeDictionary,
    ) -> Self {
        self.rules.push(LabelRule {
            code_field: code_field.into(),
            label_field: label_field.into(),
            dictionary,
        });
        self
    }

    #[must_use]
    pub fn with_measure(mut self, field: impl Into<String>, scale: f64) -> Self {
        self.measures.push(MeasureRule {
            field: field.into(),
            scale,
            whole: false,
        });
        self
    }

    /// Like [`with_measure`](Self::with_measure), for counts published in
    /// thousands: `1.005` at scale 1000 becomes `1005`, not `1004.999...`.
    #[must_use]
    pub fn with_count(mut self, field: impl Into<String>, scale: f64) -> Self {
        self.measures.push(MeasureRule {
            field: field.into(),
            scale,
            whole: true,
        });
        self
    }

    pub fn rules(&self) -> &[LabelRule] {
        &self.rules
    }

    pub fn measures(&self) -> &[MeasureRule] {
        &self.measures
    }
}

/// Counters collected while labeling a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LabelStats {
    pub records: usize,
    /// Out-of-domain codes per label field, with occurrence counts.
    pub unmapped: BTreeMap<String, BTreeMap<i64, usize>>,
    /// Suppressed measure values per measure field.
    pub suppressed: BTreeMap<String, usize>,
}

impl LabelStats {
    pub fn total_unmapped(&self) -> usize {
        self.unmapped.values().flat_map(BTreeMap::values).sum()
    }

    pub fn total_suppressed(&self) -> usize {
        self.suppressed.values().sum()
    }

    /// Records one unmapped code. Returns true the first time the
    /// (field, code) pair is seen.
    fn record_unmapped(&mut self, field: &str, code: i64) -> bool {
        let count = self
            .unmapped
            .entry(field.to_string())
            .or_default()
            .entry(code)
            .or_default();
        *count += 1;
        *count == 1
    }
}

/// Output of [`label_records`].
#[derive(Debug, Clone, Default)]
pub struct LabelOutcome {
    pub records: Vec<LabeledRecord>,
    pub stats: LabelStats,
}

/// Labels a batch, preserving order.
pub fn label_records(records: &[NormalizedRecord], plan: &LabelPlan) -> LabelOutcome {
    let span = info_span!("label", records = records.len(), rules = plan.rules.len());
    let _guard = span.enter();
    let start = Instant::now();

    let mut stats = LabelStats::default();
    let records: Vec<LabeledRecord> = records
        .iter()
        .map(|record| label_record(record, plan, &mut stats))
        .collect();

    info!(
        records = stats.records,
        unmapped = stats.total_unmapped(),
        suppressed = stats.total_suppressed(),
        duration_ms = start.elapsed().as_millis(),
        "labeling complete"
    );
    LabelOutcome { records, stats }
}

/// Labels one record.
///
/// The result depends only on `record` and `plan`; `stats` is only
/// written to.
pub fn label_record(
    record: &NormalizedRecord,
    plan: &LabelPlan,
    stats: &mut LabelStats,
) -> LabeledRecord {
    stats.records += 1;
    let mut fields = record.fields().clone();

    for rule in &plan.rules {
        let Some(value) = record.get(&rule.code_field) else {
            continue;
        };
        let code = value.as_int();
        let label = match rule.dictionary.label(code) {
            LabelLookup::Mapped(label) => Value::Text(label.to_string()),
            LabelLookup::Fallback(label) => {
                if let Some(code) = code
                    && stats.record_unmapped(&rule.label_field, code)
                {
                    warn!(
                        field = %rule.code_field,
                        code,
                        dictionary = rule.dictionary.name,
                        fallback = label,
                        "code outside dictionary domain"
                    );
                }
                Value::Text(label.to_string())
            }
            LabelLookup::Missing => Value::Missing,
        };
        fields.insert(rule.label_field.clone(), label);
    }

    let mut measures = BTreeMap::new();
    for rule in &plan.measures {
        let Some(value) = record.get(&rule.field) else {
            continue;
        };
        let measure = match value {
            Value::Suppressed => {
                *stats.suppressed.entry(rule.field.clone()).or_default() += 1;
                MeasureValue::suppressed()
            }
            other => match other.as_float() {
                Some(raw) if rule.whole => MeasureValue::reported(raw, rule.scale).rounded(),
                Some(raw) => MeasureValue::reported(raw, rule.scale),
                None => MeasureValue::missing(),
            },
        };
        // suppressed collapses to zero; missing stays missing
        let rendered = if measure.raw.is_some() || measure.suppressed {
            Value::Float(measure.value)
        } else {
            Value::Missing
        };
        fields.insert(rule.field.clone(), rendered);
        measures.insert(rule.field.clone(), measure);
    }

    LabeledRecord::new(record.id(), fields, measures)
}
