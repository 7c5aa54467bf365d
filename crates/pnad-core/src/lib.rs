//! PNAD pipeline driver.
//!
//! Wires ingestion, normalization, labeling, filtering, aggregation and
//! export into the three workflows:
//!
//! - [`run_neet`]: NEET youth counts from SIDRA, aggregated by year, sex and race
//! - [`run_label`]: labels a pre-renamed extract in human column order
//! - [`run_extract`]: age-band extract from raw microdata files
//!
//! Each run returns a [`RunReport`] with row counts, per-source schema
//! negotiation results and the normalization and labeling diagnostics.
//!
//! # Example
//!
//! ```ignore
//! use pnad_core::{PipelineConfig, run_extract};
//!
//! let config = PipelineConfig::load(Path::new("pnad.toml"))?;
//! let report = run_extract(&config.extract)?;
//! println!("{} rows written to {}", report.rows_out, report.output.display());
//! ```

pub mod config;
pub mod error;
pub mod layout;
pub mod report;
mod workflows;

pub use config::{ConfigError, ExtractConfig, LabelConfig, NeetConfig, PipelineConfig};
pub use error::{PipelineError, Result, Stage, StageError};
pub use report::{NeetRun, RunReport, SourceReport, Workflow};
pub use workflows::{run_extract, run_label, run_neet};
