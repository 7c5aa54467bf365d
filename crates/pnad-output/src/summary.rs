//! Export of aggregated tables.

use std::io::Write;
use std::path::Path;

use csv::Writer;
use tracing::info;

use pnad_model::{AggregateTable, GroupValue, format_numeric};

use crate::common::ensure_parent_dir;
use crate::error::{OutputError, Result};

/// Writes an aggregate table as CSV: key headers then the measure header,
/// one row per group in table order.
pub fn write_aggregate<W: Write>(writer: W, table: &AggregateTable) -> csv::Result<usize> {
    let mut csv = Writer::from_writer(writer);

    let mut header: Vec<&str> = table.key_headers.iter().map(String::as_str).collect();
    header.push(&table.measure_header);
    csv.write_record(&header)?;

    for row in &table.rows {
        let mut cells: Vec<String> = row.key.iter().map(GroupValue::render).collect();
        cells.push(format_numeric(row.total));
        csv.write_record(&cells)?;
    }
    csv.flush()?;
    Ok(table.len())
}

/// Writes an aggregate table to a CSV file, creating parent directories.
pub fn write_aggregate_csv(path: &Path, table: &AggregateTable) -> Result<usize> {
    ensure_parent_dir(path)?;
    let file = std::fs::File::create(path).map_err(|e| OutputError::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let rows = write_aggregate(file, table).map_err(|e| OutputError::write(path, &e))?;
    info!(path = %path.display(), rows, "summary export written");
    Ok(rows)
}
