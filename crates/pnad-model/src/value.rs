//! Cell values before and after normalization.

use serde::{Deserialize, Serialize};

/// A field value as delivered by the data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RawValue {
    Int(i64),
    Text(String),
    Missing,
}

impl RawValue {
    /// Builds a value from a raw text cell; blank cells become [`RawValue::Missing`].
    pub fn from_cell(cell: &str) -> Self {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            Self::Missing
        } else {
            Self::Text(trimmed.to_string())
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// A typed value under a canonical field name.
///
/// `Suppressed` marks a disclosure-control sentinel (`-`, `...`) and is kept
/// apart from `Missing` so later stages can tell "withheld" from "absent".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
    Suppressed,
    Missing,
}

impl Value {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric view of the value; integers widen to `f64`.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn is_suppressed(&self) -> bool {
        matches!(self, Self::Suppressed)
    }

    /// Text used in exported files. Missing and suppressed values are empty cells.
    pub fn render(&self) -> String {
        match self {
            Self::Int(v) => v.to_string(),
            Self::Float(v) => format_numeric(*v),
            Self::Text(v) => v.clone(),
            Self::Suppressed | Self::Missing => String::new(),
        }
    }
}

/// Formats a floating-point number as a string without trailing zeros.
pub fn format_numeric(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_cells_are_missing() {
        assert_eq!(RawValue::from_cell("   "), RawValue::Missing);
        assert_eq!(RawValue::from_cell(" 35 "), RawValue::Text("35".to_string()));
    }

    #[test]
    fn render_keeps_integers_intact() {
        assert_eq!(Value::Int(100).render(), "100");
        assert_eq!(Value::Float(8000.0).render(), "8000");
        assert_eq!(Value::Float(1234.5).render(), "1234.5");
        assert_eq!(Value::Suppressed.render(), "");
        assert_eq!(Value::Missing.render(), "");
    }

    #[test]
    fn format_numeric_strips_trailing_zeros_only_after_the_point() {
        assert_eq!(format_numeric(10.0), "10");
        assert_eq!(format_numeric(1.50), "1.5");
        assert_eq!(format_numeric(0.0), "0");
        assert_eq!(format_numeric(-0.0), "0");
    }

    #[test]
    fn numeric_views() {
        assert_eq!(Value::Int(3).as_float(), Some(3.0));
        assert_eq!(Value::Float(2.5).as_int(), None);
        assert_eq!(Value::Suppressed.as_float(), None);
        assert_eq!(Value::Text("SP".into()).as_text(), Some("SP"));
    }
}
