//! Code dictionaries for PNAD Contínua survey variables.
//!
//! Dictionaries are compiled-in `static` tables: built once, never mutated,
//! shared without locking.
//!
//! # Example
//!
//! ```
//! use pnad_standards::{LabelLookup, SEX, dictionary};
//!
//! assert_eq!(SEX.label(Some(1)), LabelLookup::Mapped("Male"));
//! assert_eq!(SEX.label(Some(7)), LabelLookup::Fallback("NA"));
//!
//! let race = dictionary("race").unwrap();
//! assert_eq!(race.label_text(Some(2)), Some("Black"));
//! ```

#![deny(unsafe_code)]

pub mod dictionary;
pub mod registry;
pub mod survey;

pub use dictionary::{CodeDictionary, LabelLookup, MissingPolicy};
pub use registry::{DICTIONARIES, dictionaries_for_variable, dictionary};
pub use survey::{
    AREA, CONTRIBUTOR, DISCOURAGED, EDUCATION_LEVEL, OCCUPATION, RACE, SCHOOL_ATTENDANCE, SEX,
    UF_ABBREVIATION, UF_NAME,
};
