//! Record types for each pipeline stage.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::RecordId;
use crate::value::{RawValue, Value};

/// One respondent-quarter observation as returned by the data source.
///
/// Field names are the source's own vocabulary (`V2007`, `ano`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    id: RecordId,
    fields: BTreeMap<String, RawValue>,
}

impl RawRecord {
    pub fn new(id: RecordId, fields: BTreeMap<String, RawValue>) -> Self {
        Self { id, fields }
    }

    /// Builder-style insert, used while the source assembles the record.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: RawValue) -> Self {
        self.fields.insert(field.into(), value);
        self
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn get(&self, field: &str) -> Option<&RawValue> {
        self.fields.get(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A record with typed values under canonical names.
///
/// Fields the source file did not provide are absent, not `Missing`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    id: RecordId,
    fields: BTreeMap<String, Value>,
}

impl NormalizedRecord {
    pub fn new(id: RecordId, fields: BTreeMap<String, Value>) -> Self {
        Self { id, fields }
    }

    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: Value) -> Self {
        self.fields.insert(field.into(), value);
        self
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn int(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(Value::as_int)
    }

    pub fn float(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(Value::as_float)
    }

    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }
}

/// Summable measure after suppression handling.
///
/// `raw` is the parsed source value (`None` when suppressed or missing),
/// `value` is what aggregation sums: `raw * scale`, or zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasureValue {
    pub raw: Option<f64>,
    pub value: f64,
    pub suppressed: bool,
}

impl MeasureValue {
    pub fn reported(raw: f64, scale: f64) -> Self {
        Self {
            raw: Some(raw),
            value: raw * scale,
            suppressed: false,
        }
    }

    /// Rounds the summable value to the nearest whole number.
    #[must_use]
    pub fn rounded(self) -> Self {
        Self {
            value: self.value.round(),
            ..self
        }
    }

    pub fn suppressed() -> Self {
        Self {
            raw: None,
            value: 0.0,
            suppressed: true,
        }
    }

    pub fn missing() -> Self {
        Self {
            raw: None,
            value: 0.0,
            suppressed: false,
        }
    }
}

/// A normalized record with dictionary labels attached.
///
/// Codes are kept next to their labels (`Sex_code` and `Sex_label`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledRecord {
    id: RecordId,
    fields: BTreeMap<String, Value>,
    measures: BTreeMap<String, MeasureValue>,
}

impl LabeledRecord {
    pub fn new(
        id: RecordId,
        fields: BTreeMap<String, Value>,
        measures: BTreeMap<String, MeasureValue>,
    ) -> Self {
        Self {
            id,
            fields,
            measures,
        }
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn int(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(Value::as_int)
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_text)
    }

    pub fn measure(&self, field: &str) -> Option<&MeasureValue> {
        self.measures.get(field)
    }

    pub fn measures(&self) -> &BTreeMap<String, MeasureValue> {
        &self.measures
    }

    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }

    /// Key component for grouping on `field`.
    pub fn group_value(&self, field: &str) -> GroupValue {
        self.get(field).map_or(GroupValue::Missing, GroupValue::from)
    }

    /// Numeric value summed for `field`.
    ///
    /// Declared measures use their suppression-aware value; other numeric
    /// fields are used as-is; anything else counts as zero.
    pub fn summable(&self, field: &str) -> f64 {
        if let Some(measure) = self.measures.get(field) {
            return measure.value;
        }
        self.get(field).and_then(Value::as_float).unwrap_or(0.0)
    }
}

/// One component of an aggregation key.
///
/// The derived ordering puts integers before text and missing values last,
/// so years sort numerically and labels lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GroupValue {
    Int(i64),
    Text(String),
    Missing,
}

impl GroupValue {
    pub fn render(&self) -> String {
        match self {
            Self::Int(v) => v.to_string(),
            Self::Text(v) => v.clone(),
            Self::Missing => String::new(),
        }
    }
}

impl From<&Value> for GroupValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Int(v) => Self::Int(*v),
            Value::Float(v) if v.fract() == 0.0 && v.is_finite() => Self::Int(*v as i64),
            Value::Float(v) => Self::Text(crate::format_numeric(*v)),
            Value::Text(v) => Self::Text(v.clone()),
            Value::Suppressed | Value::Missing => Self::Missing,
        }
    }
}

/// A group-key tuple and its summed measure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedRecord {
    pub key: Vec<GroupValue>,
    pub total: f64,
}

/// Aggregation output with its column headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateTable {
    /// Output header for each key component, in key order.
    pub key_headers: Vec<String>,
    /// Output header for the summed measure.
    pub measure_header: String,
    pub rows: Vec<AggregatedRecord>,
}

impl AggregateTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.rows.iter().map(|r| r.total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id() -> RecordId {
        RecordId::derive("test", 1)
    }

    #[test]
    fn group_values_order_years_before_labels_and_missing_last() {
        let mut values = vec![
            GroupValue::Missing,
            GroupValue::Text("Female".into()),
            GroupValue::Int(2024),
            GroupValue::Int(2022),
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                GroupValue::Int(2022),
                GroupValue::Int(2024),
                GroupValue::Text("Female".into()),
                GroupValue::Missing,
            ]
        );
    }

    #[test]
    fn integral_floats_group_as_integers() {
        assert_eq!(GroupValue::from(&Value::Float(2023.0)), GroupValue::Int(2023));
        assert_eq!(
            GroupValue::from(&Value::Float(1.5)),
            GroupValue::Text("1.5".into())
        );
        assert_eq!(GroupValue::from(&Value::Suppressed), GroupValue::Missing);
    }

    #[test]
    fn summable_prefers_declared_measure() {
        let mut fields = BTreeMap::new();
        fields.insert("Valor".to_string(), Value::Float(0.0));
        fields.insert("Weight".to_string(), Value::Float(2.5));
        let mut measures = BTreeMap::new();
        measures.insert("Valor".to_string(), MeasureValue::suppressed());
        let record = LabeledRecord::new(id(), fields, measures);

        assert_eq!(record.summable("Valor"), 0.0);
        assert_eq!(record.summable("Weight"), 2.5);
        assert_eq!(record.summable("Absent"), 0.0);
        assert!(record.measure("Valor").unwrap().suppressed);
    }

    #[test]
    fn raw_record_builder_keeps_fields() {
        let record = RawRecord::new(id(), BTreeMap::new())
            .with("V2007", RawValue::Text("1".into()))
            .with("V2009", RawValue::Missing);
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("V2009"), Some(&RawValue::Missing));
        assert_eq!(record.get("V2010"), None);
    }
}
