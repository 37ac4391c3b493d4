// curator-core/src/domain/table/value.rs

use chrono::NaiveDate;
use std::fmt;

/// ISO rendering used for keys and messages. Display formats only apply on output.
const ISO_DATE: &str = "%Y-%m-%d";

/// A single typed cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Canonical string used for uniqueness and membership checks.
    /// Null has no key: it never equals anything, not even another null.
    pub fn key(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Text(s) => Some(s.clone()),
            Self::Number(n) => Some(format_number(*n)),
            Self::Date(d) => Some(d.format(ISO_DATE).to_string()),
        }
    }

    /// Output rendering. Dates use the pipeline's display format, nulls become empty cells.
    pub fn render(&self, date_format: &str) -> String {
        match self {
            Self::Null => String::new(),
            Self::Text(s) => s.clone(),
            Self::Number(n) => format_number(*n),
            Self::Date(d) => d.format(date_format).to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            other => write!(f, "{}", other.render(ISO_DATE)),
        }
    }
}

/// Parses a cell into a finite number. Blank, NaN and infinite inputs are rejected.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

pub fn format_number(n: f64) -> String {
    // -0 would otherwise leak into outputs as "-0"
    if n == 0.0 {
        return "0".to_string();
    }
    format!("{}", n)
}

pub fn round_to(n: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (n * factor).round() / factor
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_number_keys_are_canonical() {
        assert_eq!(Value::Number(3.0).key().unwrap(), "3");
        assert_eq!(Value::Number(10.5).key().unwrap(), "10.5");
        assert_eq!(Value::Number(-0.0).key().unwrap(), "0");
    }

    #[test]
    fn test_null_has_no_key() {
        assert_eq!(Value::Null.key(), None);
        assert_eq!(Value::Null.render("%d-%m-%Y"), "");
    }

    #[test]
    fn test_dates_render_with_display_format() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(Value::Date(d).render("%d-%m-%Y"), "09-03-2024");
        assert_eq!(Value::Date(d).key().unwrap(), "2024-03-09");
        assert_eq!(Value::Date(d).to_string(), "2024-03-09");
    }

    #[test]
    fn test_parse_number_rejects_garbage() {
        assert_eq!(parse_number(" 12.5 "), Some(12.5));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn test_round_to_cents() {
        assert_eq!(round_to(10.456, 2), 10.46);
        assert_eq!(round_to(0.1 + 0.2, 2), 0.3);
    }
}
