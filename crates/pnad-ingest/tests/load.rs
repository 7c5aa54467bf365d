//! Loading microdata files from different survey rounds.

use std::fs;

use pnad_ingest::{IngestError, load_csv, require_files};
use pnad_model::{FieldManifest, FieldSpec, RawValue};
use tempfile::TempDir;

fn microdata_manifest() -> FieldManifest {
    FieldManifest::new(vec![
        FieldSpec::code("ano", "Year"),
        FieldSpec::code("trimestre", "Quarter"),
        FieldSpec::code("V2007", "Sex_code"),
        FieldSpec::code("V2009", "Age"),
        FieldSpec::code("V4032", "Contributor_code"),
        FieldSpec::measure("V1028", "Weight_V1028"),
    ])
    .unwrap()
}

#[test]
fn rounds_with_different_headers_negotiate_independently() {
    let dir = TempDir::new().unwrap();
    let old = dir.path().join("2022.csv");
    let new = dir.path().join("2023.csv");
    fs::write(&old, "ano,trimestre,V2007,V2009,V1028\n2022,1,1,15,101.5\n").unwrap();
    fs::write(
        &new,
        "ano,trimestre,V2007,V2009,V4032,V1028,V9001\n2023,2,2,19,1,88.25,x\n",
    )
    .unwrap();

    require_files(&[&old, &new]).unwrap();
    let manifest = microdata_manifest();
    let first = load_csv(&old, &manifest).unwrap();
    let second = load_csv(&new, &manifest).unwrap();

    assert_eq!(first.schema.missing, vec!["V4032"]);
    assert!(second.schema.is_complete());
    assert_eq!(second.schema.unexpected, vec!["V9001"]);

    assert_eq!(first.records[0].get("V4032"), None);
    assert_eq!(
        second.records[0].get("V4032"),
        Some(&RawValue::Text("1".to_string()))
    );
    assert_ne!(first.records[0].id(), second.records[0].id());
}

#[test]
fn missing_input_is_detected_before_loading() {
    let dir = TempDir::new().unwrap();
    let present = dir.path().join("dados_brutos.csv");
    fs::write(&present, "ano\n2023\n").unwrap();
    let missing = dir.path().join("absent.csv");

    let err = require_files(&[present, missing.clone()]).unwrap_err();
    assert_eq!(err.path(), missing.as_path());
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn quoted_cells_and_bom_are_handled() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("2024.csv");
    fs::write(&path, "\u{feff}ano,V2009,V1028\n\"2024\", 20 ,\"1,5\"\n").unwrap();

    let loaded = load_csv(&path, &microdata_manifest()).unwrap();
    assert_eq!(loaded.headers, vec!["ano", "V2009", "V1028"]);
    let record = &loaded.records[0];
    assert_eq!(record.get("ano"), Some(&RawValue::Text("2024".into())));
    assert_eq!(record.get("V2009"), Some(&RawValue::Text("20".into())));
    assert_eq!(record.get("V1028"), Some(&RawValue::Text("1,5".into())));
}
