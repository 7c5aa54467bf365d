//! IBGE SIDRA data source.
//!
//! The SIDRA values API publishes aggregated survey tables. This crate
//! renders a [`SidraQuery`] to an API path, fetches it with a blocking
//! client and converts the response rows into
//! [`RawRecord`](pnad_model::RawRecord)s whose sex and race codes use the
//! microdata coding, so the same dictionaries label both sources.
//!
//! Pipelines depend on the [`DataSource`] trait, not on the client, so a
//! workflow can run against canned rows in tests.

mod client;
mod error;
mod query;
mod rows;
mod translate;

pub use client::{DataSource, SIDRA_API_URL, SidraClient};
pub use error::{Result, SidraError};
pub use query::SidraQuery;
pub use rows::{VALUE_FIELD, YEAR_FIELD, parse_rows};
pub use translate::{RACE_FIELD, SEX_FIELD, translate_category};
