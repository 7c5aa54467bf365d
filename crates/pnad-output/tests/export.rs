//! Exported CSV text for both table kinds.

use std::collections::BTreeMap;
use std::fs;

use pnad_model::{
    AggregateTable, AggregatedRecord, GroupValue, LabeledRecord, MeasureValue, RecordId, Value,
};
use pnad_output::{
    DetailOptions, OutputColumn, write_aggregate, write_aggregate_csv, write_detail_csv,
};
use tempfile::TempDir;

fn neet_table() -> AggregateTable {
    let row = |year: i64, sex: &str, race: &str, total: f64| AggregatedRecord {
        key: vec![
            GroupValue::Int(year),
            GroupValue::Text(sex.to_string()),
            GroupValue::Text(race.to_string()),
        ],
        total,
    };
    AggregateTable {
        key_headers: vec!["Year".into(), "Sex".into(), "Race".into()],
        measure_header: "NEET_Count".into(),
        rows: vec![
            row(2022, "Female", "Pardo", 1_523_000.0),
            row(2022, "Male", "White", 8000.0),
            row(2023, "Male", "White", 0.0),
        ],
    }
}

fn microdata_record(number: u64, uf: &str, age: i64, income: Value) -> LabeledRecord {
    let mut fields = BTreeMap::new();
    fields.insert("Year".to_string(), Value::Int(2023));
    fields.insert("id_uf".to_string(), Value::Int(35));
    fields.insert("UF".to_string(), Value::Text(uf.to_string()));
    fields.insert("UF_name".to_string(), Value::Text("São Paulo".to_string()));
    fields.insert("Age".to_string(), Value::Int(age));
    fields.insert("Income_all_jobs".to_string(), income.clone());
    let mut measures = BTreeMap::new();
    let measure = match income {
        Value::Float(v) => MeasureValue::reported(v, 1.0),
        _ => MeasureValue::missing(),
    };
    measures.insert("Income_all_jobs".to_string(), measure);
    LabeledRecord::new(RecordId::derive("2023.csv", number), fields, measures)
}

#[test]
fn aggregate_csv_text() {
    let mut buffer = Vec::new();
    let rows = write_aggregate(&mut buffer, &neet_table()).unwrap();
    assert_eq!(rows, 3);
    insta::assert_snapshot!(String::from_utf8(buffer).unwrap(), @r"
    Year,Sex,Race,NEET_Count
    2022,Female,Pardo,1523000
    2022,Male,White,8000
    2023,Male,White,0
    ");
}

#[test]
fn detail_file_is_written_into_nested_dirs() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out").join("pnad_jovens_14_25_labeled.csv");
    let records = vec![
        microdata_record(1, "SP", 17, Value::Float(1320.0)),
        microdata_record(2, "SP", 24, Value::Missing),
    ];
    let columns = vec![
        OutputColumn::same("Year"),
        OutputColumn::same("id_uf"),
        OutputColumn::same("UF"),
        OutputColumn::same("UF_name"),
        OutputColumn::same("Age"),
        OutputColumn::same("Income_all_jobs"),
    ];

    let rows = write_detail_csv(&path, &records, &columns, &DetailOptions::default()).unwrap();
    assert_eq!(rows, 2);
    insta::assert_snapshot!(fs::read_to_string(&path).unwrap(), @r"
    Year,id_uf,UF,UF_name,Age,Income_all_jobs
    2023,35,SP,São Paulo,17,1320
    2023,35,SP,São Paulo,24,
    ");
}

#[test]
fn aggregate_file_round_trips_through_the_csv_reader() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("neet_summary.csv");
    write_aggregate_csv(&path, &neet_table()).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, vec!["Year", "Sex", "Race", "NEET_Count"]);
    assert_eq!(reader.records().count(), 3);
}
