//! CSV reading utilities.

mod header;
mod reader;

pub use header::{normalize_header, read_csv_schema};
pub use reader::{LoadedFile, load_csv, validate_encoding};
