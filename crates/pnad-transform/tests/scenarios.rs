//! End-to-end stage scenarios: raw values through normalization, labeling
//! and aggregation.

use std::collections::BTreeMap;

use pnad_model::{FieldManifest, FieldSpec, GroupValue, RawRecord, RawValue, RecordId, Value};
use pnad_normalization::normalize_records;
use pnad_standards::{RACE, SEX};
use pnad_transform::{GroupKey, LabelPlan, aggregate, label_records, latest_year_slice};

fn sidra_manifest() -> FieldManifest {
    FieldManifest::new(vec![
        FieldSpec::code("Year", "Year"),
        FieldSpec::code("Sex_code", "Sex_code"),
        FieldSpec::code("Race_code", "Race_code"),
        FieldSpec::code("Age", "Age"),
        FieldSpec::measure("Valor", "Valor"),
    ])
    .unwrap()
}

fn plan(scale: f64) -> LabelPlan {
    LabelPlan::new()
        .with_rule("Sex_code", "Sex_label", &SEX)
        .with_rule("Race_code", "Race_label", &RACE)
        .with_measure("Valor", scale)
}

fn raw(number: u64, cells: &[(&str, &str)]) -> RawRecord {
    cells.iter().fold(
        RawRecord::new(RecordId::derive("scenario", number), BTreeMap::new()),
        |record, (field, cell)| record.with(*field, RawValue::from_cell(cell)),
    )
}

fn keys() -> Vec<GroupKey> {
    vec![
        GroupKey::new("Year", "Year"),
        GroupKey::new("Sex_label", "Sex"),
        GroupKey::new("Race_label", "Race"),
    ]
}

#[test]
fn suppressed_valor_labels_to_zero() {
    let records = vec![raw(
        1,
        &[
            ("Year", "2023"),
            ("Sex_code", "1"),
            ("Race_code", "2"),
            ("Age", "16"),
            ("Valor", "..."),
        ],
    )];
    let normalized = normalize_records(&records, &sidra_manifest());
    assert_eq!(normalized.records[0].get("Valor"), Some(&Value::Suppressed));

    let labeled = label_records(&normalized.records, &plan(1000.0));
    let record = &labeled.records[0];
    assert_eq!(record.int("Year"), Some(2023));
    assert_eq!(record.text("Sex_label"), Some("Male"));
    assert_eq!(record.text("Race_label"), Some("Black"));
    assert_eq!(record.int("Age"), Some(16));
    assert_eq!(record.get("Valor"), Some(&Value::Float(0.0)));
    assert!(record.measure("Valor").is_some_and(|m| m.suppressed));
    assert_eq!(labeled.stats.suppressed.get("Valor"), Some(&1));
}

#[test]
fn dash_sentinel_also_sums_as_zero() {
    let records = vec![
        raw(1, &[("Year", "2023"), ("Sex_code", "1"), ("Race_code", "1"), ("Valor", "-")]),
        raw(2, &[("Year", "2023"), ("Sex_code", "1"), ("Race_code", "1"), ("Valor", "2")]),
    ];
    let normalized = normalize_records(&records, &sidra_manifest());
    let labeled = label_records(&normalized.records, &plan(1000.0));
    let table = aggregate(&labeled.records, &keys(), "Valor", "NEET_Count");
    assert_eq!(table.rows[0].total, 2000.0);
}

#[test]
fn scale_applies_only_where_declared() {
    let records = vec![raw(1, &[("Year", "2023"), ("Valor", "5")])];
    let normalized = normalize_records(&records, &sidra_manifest());

    let scaled = label_records(&normalized.records, &plan(1000.0));
    let unscaled = label_records(&normalized.records, &plan(1.0));
    assert_eq!(scaled.records[0].get("Valor"), Some(&Value::Float(5000.0)));
    assert_eq!(unscaled.records[0].get("Valor"), Some(&Value::Float(5.0)));

    let undeclared = label_records(&normalized.records, &LabelPlan::new());
    assert_eq!(undeclared.records[0].get("Valor"), Some(&Value::Float(5.0)));
    assert!(undeclared.records[0].measure("Valor").is_none());
}

#[test]
fn same_group_rows_sum_into_one_count() {
    let records = vec![
        raw(1, &[("Year", "2023"), ("Sex_code", "1"), ("Race_code", "1"), ("Valor", "5000")]),
        raw(2, &[("Year", "2023"), ("Sex_code", "1"), ("Race_code", "1"), ("Valor", "3000")]),
    ];
    let normalized = normalize_records(&records, &sidra_manifest());
    let labeled = label_records(&normalized.records, &plan(1.0));
    let table = aggregate(&labeled.records, &keys(), "Valor", "NEET_Count");

    assert_eq!(table.len(), 1);
    let row = &table.rows[0];
    assert_eq!(
        row.key,
        vec![
            GroupValue::Int(2023),
            GroupValue::Text("Male".into()),
            GroupValue::Text("White".into()),
        ]
    );
    assert_eq!(row.total, 8000.0);
}

#[test]
fn years_are_emitted_ascending_and_latest_is_sliced() {
    let records: Vec<RawRecord> = ["2024", "2022", "2023"]
        .iter()
        .enumerate()
        .map(|(i, year)| {
            raw(
                i as u64 + 1,
                &[("Year", year), ("Sex_code", "2"), ("Race_code", "4"), ("Valor", "1")],
            )
        })
        .collect();
    let normalized = normalize_records(&records, &sidra_manifest());
    let labeled = label_records(&normalized.records, &plan(1000.0));
    let table = aggregate(&labeled.records, &keys(), "Valor", "NEET_Count");

    let years: Vec<String> = table.rows.iter().map(|r| r.key[0].render()).collect();
    assert_eq!(years, vec!["2022", "2023", "2024"]);

    let latest = latest_year_slice(&table, 0);
    assert_eq!(latest.len(), 1);
    assert_eq!(latest.rows[0].key[0], GroupValue::Int(2024));
    assert_eq!(latest.rows[0].total, 1000.0);
}

#[test]
fn unmapped_codes_keep_the_row() {
    let records = vec![raw(
        1,
        &[
            ("Year", "2023"),
            ("Sex_code", "9"),
            ("Race_code", "77"),
            ("Valor", "10"),
        ],
    )];
    let normalized = normalize_records(&records, &sidra_manifest());
    let labeled = label_records(&normalized.records, &plan(1.0));

    assert_eq!(labeled.records.len(), 1);
    assert_eq!(labeled.records[0].text("Sex_label"), Some("NA"));
    assert_eq!(labeled.records[0].text("Race_label"), Some("Unknown"));
    assert_eq!(labeled.stats.total_unmapped(), 2);
}
