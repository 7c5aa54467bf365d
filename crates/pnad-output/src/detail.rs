//! Record-level export of labeled records.

use std::io::Write;
use std::path::Path;

use csv::Writer;
use tracing::info;

use pnad_model::{LabeledRecord, Value};

use crate::common::{OutputColumn, ensure_parent_dir};
use crate::error::{OutputError, Result};

/// Options for detail exports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailOptions {
    /// Measure fields that get a `<header>_suppressed` column right after
    /// their own column.
    pub suppression_flags: Vec<String>,
}

impl DetailOptions {
    fn flags(&self, column: &OutputColumn) -> bool {
        self.suppression_flags.iter().any(|f| *f == column.field)
    }
}

/// Writes labeled records as CSV, in record order.
///
/// Missing and suppressed values are empty cells. Returns the number of
/// data rows written.
pub fn write_detail<W: Write>(
    writer: W,
    records: &[LabeledRecord],
    columns: &[OutputColumn],
    options: &DetailOptions,
) -> csv::Result<usize> {
    let mut csv = Writer::from_writer(writer);

    let mut header: Vec<String> = Vec::with_capacity(columns.len());
    for column in columns {
        header.push(column.header.clone());
        if options.flags(column) {
            header.push(format!("{}_suppressed", column.header));
        }
    }
    csv.write_record(&header)?;

    let mut row: Vec<String> = Vec::with_capacity(header.len());
    for record in records {
        row.clear();
        for column in columns {
            row.push(record.get(&column.field).map_or_else(String::new, Value::render));
            if options.flags(column) {
                let suppressed = record.measure(&column.field).is_some_and(|m| m.suppressed);
                row.push(suppressed.to_string());
            }
        }
        csv.write_record(&row)?;
    }
    csv.flush()?;
    Ok(records.len())
}

/// Writes labeled records to a CSV file, creating parent directories.
pub fn write_detail_csv(
    path: &Path,
    records: &[LabeledRecord],
    columns: &[OutputColumn],
    options: &DetailOptions,
) -> Result<usize> {
    ensure_parent_dir(path)?;
    let file = std::fs::File::create(path).map_err(|e| OutputError::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let rows = write_detail(file, records, columns, options)
        .map_err(|e| OutputError::write(path, &e))?;
    info!(path = %path.display(), rows, columns = columns.len(), "detail export written");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pnad_model::{MeasureValue, RecordId};
    use std::collections::BTreeMap;

    fn record(weight: MeasureValue, rendered: Value) -> LabeledRecord {
        let mut fields = BTreeMap::new();
        fields.insert("Year".to_string(), Value::Int(2023));
        fields.insert("Sex_label".to_string(), Value::Text("Female".into()));
        fields.insert("Weight".to_string(), rendered);
        let mut measures = BTreeMap::new();
        measures.insert("Weight".to_string(), weight);
        LabeledRecord::new(RecordId::derive("test", 1), fields, measures)
    }

    fn columns() -> Vec<OutputColumn> {
        vec![
            OutputColumn::same("Year"),
            OutputColumn::new("Sex", "Sex_label"),
            OutputColumn::same("Weight"),
        ]
    }

    fn render(records: &[LabeledRecord], options: &DetailOptions) -> String {
        let mut buffer = Vec::new();
        write_detail(&mut buffer, records, &columns(), options).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_missing_and_suppressed_render_empty_or_zero() {
        let records = vec![
            record(MeasureValue::reported(12.5, 1.0), Value::Float(12.5)),
            record(MeasureValue::suppressed(), Value::Float(0.0)),
            record(MeasureValue::missing(), Value::Missing),
        ];
        assert_eq!(
            render(&records, &DetailOptions::default()),
            "Year,Sex,Weight\n2023,Female,12.5\n2023,Female,0\n2023,Female,\n"
        );
    }

    #[test]
    fn test_suppression_flag_column_follows_its_measure() {
        let records = vec![
            record(MeasureValue::reported(3.0, 1.0), Value::Float(3.0)),
            record(MeasureValue::suppressed(), Value::Float(0.0)),
        ];
        let options = DetailOptions {
            suppression_flags: vec!["Weight".to_string()],
        };
        assert_eq!(
            render(&records, &options),
            "Year,Sex,Weight,Weight_suppressed\n2023,Female,3,false\n2023,Female,0,true\n"
        );
    }
}
