//! Header probing.
//!
//! Reads only the first row of a file so a workflow can decide which
//! columns to load before touching the data.

use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{IngestError, Result};

use super::reader::validate_encoding;

/// Normalizes a header value by trimming whitespace and a UTF-8 BOM.
pub fn normalize_header(value: &str) -> String {
    value.trim().trim_start_matches('\u{feff}').trim().to_string()
}

/// Reads the header row of a CSV file.
pub fn read_csv_schema(path: &Path) -> Result<Vec<String>> {
    validate_encoding(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| IngestError::csv(path, &e))?;

    let mut first = csv::StringRecord::new();
    let has_row = reader
        .read_record(&mut first)
        .map_err(|e| IngestError::csv(path, &e))?;
    if !has_row {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let headers: Vec<String> = first.iter().map(normalize_header).collect();
    if headers.iter().all(String::is_empty) {
        return Err(IngestError::NoHeaderDetected {
            path: path.to_path_buf(),
        });
    }
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  V2007  "), "V2007");
        assert_eq!(normalize_header("\u{feff}ano"), "ano");
    }

    #[test]
    fn test_read_csv_schema_single_header() {
        let file = create_temp_csv("ano,trimestre,V2007\n2023,1,2\n");
        let headers = read_csv_schema(file.path()).unwrap();
        assert_eq!(headers, vec!["ano", "trimestre", "V2007"]);
    }

    #[test]
    fn test_read_csv_schema_with_bom() {
        let file = create_temp_csv("\u{feff}ano,V2009\n2023,17\n");
        let headers = read_csv_schema(file.path()).unwrap();
        assert_eq!(headers, vec!["ano", "V2009"]);
    }

    #[test]
    fn test_read_csv_schema_empty_file() {
        let file = create_temp_csv("");
        let result = read_csv_schema(file.path());
        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_read_csv_schema_blank_header() {
        let file = create_temp_csv(" , \n1,2\n");
        let result = read_csv_schema(file.path());
        assert!(matches!(result, Err(IngestError::NoHeaderDetected { .. })));
    }
}
