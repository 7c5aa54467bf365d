//! PNAD row normalization.
//!
//! Turns [`RawRecord`](pnad_model::RawRecord)s into
//! [`NormalizedRecord`](pnad_model::NormalizedRecord)s under a
//! [`FieldManifest`](pnad_model::FieldManifest):
//!
//! - **Integer codes**: trimmed and parsed; integral floats (`"2.0"`) accepted.
//! - **Float measures**: parsed as `f64`, comma decimals accepted.
//! - **Passthrough**: trimmed text.
//!
//! Unparseable cells become `Missing` (or `Suppressed` for disclosure
//! sentinels such as `-` and `...`) and are counted in [`NormalizeStats`].
//! Normalization never fails and a missing measure is never zero.

mod executor;

pub mod normalization;

pub use executor::{NormalizeOutcome, NormalizeStats, coerce, normalize_record, normalize_records};
pub use normalization::{is_suppression_sentinel, parse_code, parse_measure};
