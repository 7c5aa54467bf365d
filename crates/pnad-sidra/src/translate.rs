//! SIDRA category codes to survey codes.
//!
//! SIDRA tables publish their own category identifiers for sex and color
//! or race. Translating them to the microdata codes lets the survey
//! dictionaries label both sources. Codes without a translation are kept
//! as-is and end up on the dictionary fallback.

/// Record field holding the sex code.
pub const SEX_FIELD: &str = "Sex_code";
/// Record field holding the race code.
pub const RACE_FIELD: &str = "Race_code";

/// Sex categories (`Homens`, `Mulheres`) to `V2007` codes.
const SEX_CATEGORIES: &[(i64, i64)] = &[(4, 1), (5, 2)];

/// Color or race categories to `V2010` codes.
const RACE_CATEGORIES: &[(i64, i64)] = &[
    (2776, 1), // Branca
    (2777, 2), // Preta
    (2778, 3), // Amarela
    (2779, 4), // Parda
    (2780, 5), // Indígena
    (2781, 9), // Ignorado
];

/// Translates a category code for `field`, if a translation exists.
pub fn translate_category(field: &str, category: i64) -> Option<i64> {
    let table = match field {
        SEX_FIELD => SEX_CATEGORIES,
        RACE_FIELD => RACE_CATEGORIES,
        _ => return None,
    };
    table
        .iter()
        .find(|(sidra, _)| *sidra == category)
        .map(|(_, survey)| *survey)
}
