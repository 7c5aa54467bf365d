//! PNAD microdata ingestion.
//!
//! This crate loads survey CSV exports into [`RawRecord`](pnad_model::RawRecord)s.
//! Headers are probed first and intersected with the workflow's
//! [`FieldManifest`](pnad_model::FieldManifest), so files from different survey
//! rounds load even when some expected columns are absent.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use pnad_ingest::{load_csv, require_files};
//!
//! let files = [Path::new("2022.csv"), Path::new("2023.csv")];
//! require_files(&files)?;
//! for path in files {
//!     let loaded = load_csv(path, &manifest)?;
//!     println!("{}: {} rows", path.display(), loaded.len());
//! }
//! ```

mod csv;
mod discovery;
mod error;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{LoadedFile, load_csv, normalize_header, read_csv_schema, validate_encoding};

// === File Discovery ===
pub use discovery::{list_csv_files, require_files};
