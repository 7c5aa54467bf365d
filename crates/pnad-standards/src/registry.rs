//! Lookup over every built-in dictionary.

use crate::dictionary::CodeDictionary;
use crate::survey::{
    AREA, CONTRIBUTOR, DISCOURAGED, EDUCATION_LEVEL, OCCUPATION, RACE, SCHOOL_ATTENDANCE, SEX,
    UF_ABBREVIATION, UF_NAME,
};

/// All built-in dictionaries, in reporting order.
pub static DICTIONARIES: &[&CodeDictionary] = &[
    &UF_ABBREVIATION,
    &UF_NAME,
    &AREA,
    &SEX,
    &RACE,
    &SCHOOL_ATTENDANCE,
    &OCCUPATION,
    &CONTRIBUTOR,
    &EDUCATION_LEVEL,
    &DISCOURAGED,
];

/// Finds a dictionary by its short name (case-insensitive).
pub fn dictionary(name: &str) -> Option<&'static CodeDictionary> {
    DICTIONARIES
        .iter()
        .copied()
        .find(|d| d.name.eq_ignore_ascii_case(name.trim()))
}

/// Dictionaries built over a given survey variable.
pub fn dictionaries_for_variable(variable: &str) -> Vec<&'static CodeDictionary> {
    DICTIONARIES
        .iter()
        .copied()
        .filter(|d| d.source_variable.eq_ignore_ascii_case(variable.trim()))
        .collect()
}
