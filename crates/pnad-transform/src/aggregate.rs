//! Group-by-and-sum aggregation.

use std::collections::BTreeMap;
use std::time::Instant;

use tracing::{info, info_span};

use pnad_model::{AggregateTable, AggregatedRecord, GroupValue, LabeledRecord};

/// One aggregation key component: the record field and its output header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupKey {
    pub field: String,
    pub header: String,
}

impl GroupKey {
    pub fn new(field: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            header: header.into(),
        }
    }
}

/// Groups records by the exact tuple of key values and sums `measure`.
///
/// Rows come out sorted by key tuple. Strata not named in `keys` fold into
/// the same group; a missing measure contributes zero.
pub fn aggregate(
    records: &[LabeledRecord],
    keys: &[GroupKey],
    measure: &str,
    output_measure: &str,
) -> AggregateTable {
    let span = info_span!("aggregate", records = records.len(), measure);
    let _guard = span.enter();
    let start = Instant::now();

    let mut groups: BTreeMap<Vec<GroupValue>, f64> = BTreeMap::new();
    for record in records {
        let key: Vec<GroupValue> = keys.iter().map(|k| record.group_value(&k.field)).collect();
        *groups.entry(key).or_insert(0.0) += record.summable(measure);
    }

    let rows: Vec<AggregatedRecord> = groups
        .into_iter()
        .map(|(key, total)| AggregatedRecord { key, total })
        .collect();

    info!(
        groups = rows.len(),
        duration_ms = start.elapsed().as_millis(),
        "aggregation complete"
    );
    AggregateTable {
        key_headers: keys.iter().map(|k| k.header.clone()).collect(),
        measure_header: output_measure.to_string(),
        rows,
    }
}

/// Rows whose year component equals the largest year in the table.
///
/// Returns an empty table (same headers) when no row has an integer year.
pub fn latest_year_slice(table: &AggregateTable, year_key_index: usize) -> AggregateTable {
    let year_of = |row: &AggregatedRecord| match row.key.get(year_key_index) {
        Some(GroupValue::Int(year)) => Some(*year),
        _ => None,
    };
    let latest = table.rows.iter().filter_map(year_of).max();
    let rows = match latest {
        Some(latest) => table
            .rows
            .iter()
            .filter(|row| year_of(row) == Some(latest))
            .cloned()
            .collect(),
        None => Vec::new(),
    };
    AggregateTable {
        key_headers: table.key_headers.clone(),
        measure_header: table.measure_header.clone(),
        rows,
    }
}
