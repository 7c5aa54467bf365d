//! Numeric coercion for survey codes and measures.
//!
//! Survey exports mix plain integers, integral floats written by
//! spreadsheet tools (`"2.0"`), comma decimals and disclosure-control
//! sentinels. These functions parse what they can and return `None`
//! otherwise; the caller decides between missing and suppressed.

/// Markers published in place of a withheld value.
const SUPPRESSION_SENTINELS: &[&str] = &["-", "--", "...", "..", "X"];

/// Returns true when the cell is a disclosure-control sentinel.
pub fn is_suppression_sentinel(value: &str) -> bool {
    let trimmed = value.trim();
    SUPPRESSION_SENTINELS
        .iter()
        .any(|s| s.eq_ignore_ascii_case(trimmed))
}

/// Parse a string to a floating measure.
///
/// Handles:
/// - Standard numbers: "123", "-45.67"
/// - Comma decimal separator: "1234,5"
/// - Thousands separators next to a decimal point: "1,234.5"
/// - Whitespace: "  123  "
///
/// Non-finite results are rejected.
pub fn parse_measure(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    let cleaned = if trimmed.contains('.') {
        trimmed.replace(',', "")
    } else {
        trimmed.replacen(',', ".", 1)
    };

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a string to an integer code.
///
/// Integral floats (`"2.0"`) are accepted; fractional values are not.
pub fn parse_code(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(code) = trimmed.parse::<i64>() {
        return Some(code);
    }
    let float = parse_measure(trimmed)?;
    if float.fract() != 0.0 || float.abs() > i64::MAX as f64 {
        return None;
    }
    Some(float as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_codes() {
        assert_eq!(parse_code("2"), Some(2));
        assert_eq!(parse_code(" 35 "), Some(35));
        assert_eq!(parse_code("-1"), Some(-1));
    }

    #[test]
    fn test_integral_float_codes() {
        assert_eq!(parse_code("2.0"), Some(2));
        assert_eq!(parse_code("2023.00"), Some(2023));
        assert_eq!(parse_code("2.5"), None);
    }

    #[test]
    fn test_invalid_codes() {
        assert_eq!(parse_code(""), None);
        assert_eq!(parse_code("abc"), None);
        assert_eq!(parse_code("..."), None);
    }

    #[test]
    fn test_measures() {
        assert_eq!(parse_measure("123.45"), Some(123.45));
        assert_eq!(parse_measure("1234,5"), Some(1234.5));
        assert_eq!(parse_measure("1,234.5"), Some(1234.5));
        assert_eq!(parse_measure("  7  "), Some(7.0));
        assert_eq!(parse_measure("1.5E3"), Some(1500.0));
    }

    #[test]
    fn test_non_finite_measures_are_rejected() {
        assert_eq!(parse_measure("NaN"), None);
        assert_eq!(parse_measure("inf"), None);
    }

    #[test]
    fn test_sentinels() {
        for s in ["-", "--", "...", "..", "X", "x", " - "] {
            assert!(is_suppression_sentinel(s), "{s}");
        }
        assert!(!is_suppression_sentinel(""));
        assert!(!is_suppression_sentinel("0"));
        assert!(!is_suppression_sentinel("-5"));
    }
}
