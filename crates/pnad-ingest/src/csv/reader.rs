//! Manifest-driven CSV loading.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use tracing::{debug, warn};

use pnad_model::{FieldManifest, RawRecord, RawValue, RecordId, SchemaReport};

use crate::error::{IngestError, Result};

use super::header::{normalize_header, read_csv_schema};

/// Detect encoding and validate it's supported (UTF-8 only).
///
/// Checks for UTF-16 BOM markers which are not supported.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| IngestError::open(path, e))?;

    let mut buffer = [0u8; 4];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read >= 2 {
        if buffer[0..2] == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer[0..2] == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }

    Ok(())
}

/// One source file after header negotiation and loading.
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub path: PathBuf,
    /// Full header as found in the file.
    pub headers: Vec<String>,
    /// Manifest ∩ header.
    pub schema: SchemaReport,
    /// Records restricted to the available manifest fields.
    pub records: Vec<RawRecord>,
}

impl LoadedFile {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Loads a CSV file, keeping only the columns the manifest expects.
///
/// The header is probed first and intersected with the manifest; expected
/// columns absent from this file are logged and reported in
/// [`LoadedFile::schema`] rather than failing the load.
pub fn load_csv(path: &Path, manifest: &FieldManifest) -> Result<LoadedFile> {
    let headers = read_csv_schema(path)?;
    let schema = manifest.negotiate(&headers);
    for field in &schema.missing {
        warn!(
            path = %path.display(),
            field = %field,
            "expected field not present in source file"
        );
    }
    if !schema.unexpected.is_empty() {
        debug!(
            path = %path.display(),
            ignored = schema.unexpected.len(),
            "ignoring columns outside the manifest"
        );
    }

    // (column index, source name) for each column to keep
    let keep: Vec<(usize, &str)> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| schema.is_available(h))
        .map(|(idx, h)| (idx, h.as_str()))
        .collect();

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| IngestError::csv(path, &e))?;

    let source_id = path.display().to_string();
    let mut records = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        let row = row.map_err(|e| IngestError::csv(path, &e))?;
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let mut fields = BTreeMap::new();
        for &(col, name) in &keep {
            let value = row.get(col).map_or(RawValue::Missing, RawValue::from_cell);
            fields.insert(name.to_string(), value);
        }
        let record_number = (idx as u64) + 1;
        records.push(RawRecord::new(
            RecordId::derive(&source_id, record_number),
            fields,
        ));
    }

    debug!(
        path = %path.display(),
        rows = records.len(),
        columns = keep.len(),
        "loaded csv"
    );

    Ok(LoadedFile {
        path: path.to_path_buf(),
        headers: headers.iter().map(|h| normalize_header(h)).collect(),
        schema,
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pnad_model::FieldSpec;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    fn manifest() -> FieldManifest {
        FieldManifest::new(vec![
            FieldSpec::code("ano", "Year"),
            FieldSpec::code("V2009", "Age"),
            FieldSpec::measure("V1028", "Weight_V1028"),
        ])
        .unwrap()
    }

    #[test]
    fn test_load_keeps_only_manifest_columns() {
        let file = create_temp_csv("ano,V2009,V9999\n2023,17,x\n2024,,y\n");
        let loaded = load_csv(file.path(), &manifest()).unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.schema.missing, vec!["V1028"]);
        assert_eq!(loaded.schema.unexpected, vec!["V9999"]);
        let first = &loaded.records[0];
        assert_eq!(first.get("ano"), Some(&RawValue::Text("2023".into())));
        assert_eq!(first.get("V9999"), None);
        assert_eq!(loaded.records[1].get("V2009"), Some(&RawValue::Missing));
    }

    #[test]
    fn test_short_rows_fill_missing() {
        let file = create_temp_csv("ano,V2009\n2023\n");
        let loaded = load_csv(file.path(), &manifest()).unwrap();
        assert_eq!(loaded.records[0].get("V2009"), Some(&RawValue::Missing));
    }

    #[test]
    fn test_blank_rows_are_skipped() {
        let file = create_temp_csv("ano,V2009\n2023,15\n,\n2024,16\n");
        let loaded = load_csv(file.path(), &manifest()).unwrap();
        assert_eq!(loaded.len(), 2);
    }

    #[test]
    fn test_record_ids_are_stable_across_loads() {
        let file = create_temp_csv("ano,V2009\n2023,15\n2024,16\n");
        let a = load_csv(file.path(), &manifest()).unwrap();
        let b = load_csv(file.path(), &manifest()).unwrap();
        assert_eq!(a.records[0].id(), b.records[0].id());
        assert_ne!(a.records[0].id(), a.records[1].id());
    }

    #[test]
    fn test_missing_file_is_reported() {
        let result = load_csv(Path::new("/nonexistent/2023.csv"), &manifest());
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }

    #[test]
    fn test_utf16_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xFF, 0xFE, b'a', 0]).unwrap();
        let result = validate_encoding(file.path());
        assert!(matches!(
            result,
            Err(IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            })
        ));
    }
}
