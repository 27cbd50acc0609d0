//! Field values and the comparison rules used for sorting

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

/// Text that counts as a plain decimal number for sorting purposes
static DECIMAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)$").unwrap());

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// A single cell of a row
///
/// Dates keep the text they were read from, so searching and display see
/// exactly what the dataset holds while sorting stays chronological.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Date(NaiveDate, String),
    DateTime(NaiveDateTime, String),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Build a value from a JSON scalar.
    ///
    /// ISO dates and date-times inside strings become date values. Arrays and
    /// objects are kept as their compact JSON text so they stay searchable.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => FieldValue::Null,
            serde_json::Value::Bool(b) => FieldValue::Bool(*b),
            serde_json::Value::Number(n) => n
                .as_f64()
                .map(FieldValue::Number)
                .unwrap_or_else(|| FieldValue::Text(n.to_string())),
            serde_json::Value::String(s) => Self::from_text(s),
            other => FieldValue::Text(other.to_string()),
        }
    }

    /// Build a value from a CSV cell. Empty cells are null.
    pub fn from_csv(cell: &str) -> Self {
        if cell.trim().is_empty() {
            FieldValue::Null
        } else {
            Self::from_text(cell)
        }
    }

    fn from_text(s: &str) -> Self {
        let trimmed = s.trim();
        let source = s.to_string();
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
            return FieldValue::Date(date, source);
        }
        for format in DATE_TIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
                return FieldValue::DateTime(dt, source);
            }
        }
        if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(trimmed) {
            return FieldValue::DateTime(dt.naive_utc(), source);
        }
        FieldValue::Text(source)
    }

    /// The string form used for searching and default display.
    /// Null has no string form.
    pub fn search_text(&self) -> Option<String> {
        match self {
            FieldValue::Null => None,
            other => Some(other.to_string()),
        }
    }

    /// Numeric reading of the value, if it has a clean one
    fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) if DECIMAL_REGEX.is_match(s.trim()) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn as_date_time(&self) -> Option<NaiveDateTime> {
        match self {
            FieldValue::Date(d, _) => d.and_hms_opt(0, 0, 0),
            FieldValue::DateTime(dt, _) => Some(*dt),
            _ => None,
        }
    }

    /// Sort group of the value. Groups order before one another regardless
    /// of content: numbers, dates, booleans, other text, then null.
    fn kind_rank(&self) -> u8 {
        match self {
            FieldValue::Number(_) => 0,
            FieldValue::Text(_) if self.as_number().is_some() => 0,
            FieldValue::Date(..) | FieldValue::DateTime(..) => 1,
            FieldValue::Bool(_) => 2,
            FieldValue::Text(_) => 3,
            FieldValue::Null => 4,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) | FieldValue::Date(_, s) | FieldValue::DateTime(_, s) => {
                write!(f, "{}", s)
            }
        }
    }
}

/// Compare two values in ascending order.
///
/// Values are grouped by `kind_rank` first, so the result is a total order
/// even over a column of mixed kinds. Inside a group numbers (including
/// clean decimal text) compare numerically, dates chronologically, booleans
/// `false < true` and text by `collate`.
pub fn compare_values(a: &FieldValue, b: &FieldValue) -> Ordering {
    let rank = a.kind_rank();
    rank.cmp(&b.kind_rank()).then_with(|| match rank {
        0 => match (a.as_number(), b.as_number()) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            _ => Ordering::Equal,
        },
        1 => a.as_date_time().cmp(&b.as_date_time()),
        2 => match (a, b) {
            (FieldValue::Bool(x), FieldValue::Bool(y)) => x.cmp(y),
            _ => Ordering::Equal,
        },
        3 => match (a, b) {
            (FieldValue::Text(x), FieldValue::Text(y)) => collate(x, y),
            _ => Ordering::Equal,
        },
        _ => Ordering::Equal,
    })
}

/// Locale-style string ordering: letters compare case-insensitively first,
/// and only when two strings are equal ignoring case does lowercase sort
/// ahead of uppercase.
pub fn collate(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| {
        let case_key = |c: char| (!c.is_lowercase(), c);
        a.chars().map(case_key).cmp(b.chars().map(case_key))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_scalars() {
        assert_eq!(FieldValue::from_json(&json!(null)), FieldValue::Null);
        assert_eq!(FieldValue::from_json(&json!(true)), FieldValue::Bool(true));
        assert_eq!(FieldValue::from_json(&json!(50)), FieldValue::Number(50.0));
        assert_eq!(
            FieldValue::from_json(&json!("Beta")),
            FieldValue::Text("Beta".to_string())
        );
        assert_eq!(
            FieldValue::from_json(&json!("2024-03-01")),
            FieldValue::Date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), "2024-03-01".to_string())
        );
    }

    #[test]
    fn test_from_json_keeps_nested_values_as_text() {
        let value = FieldValue::from_json(&json!(["a", "b"]));
        assert_eq!(value, FieldValue::Text(r#"["a","b"]"#.to_string()));
    }

    #[test]
    fn test_from_csv_empty_cell_is_null() {
        assert_eq!(FieldValue::from_csv(""), FieldValue::Null);
        assert_eq!(FieldValue::from_csv("  "), FieldValue::Null);
        assert_eq!(FieldValue::from_csv("42"), FieldValue::Text("42".to_string()));
    }

    #[test]
    fn test_search_text() {
        assert_eq!(FieldValue::Null.search_text(), None);
        assert_eq!(FieldValue::Number(50.0).search_text().as_deref(), Some("50"));
        assert_eq!(FieldValue::Number(10.5).search_text().as_deref(), Some("10.5"));
        assert_eq!(FieldValue::Bool(false).search_text().as_deref(), Some("false"));
    }

    #[test]
    fn test_numeric_text_compares_numerically() {
        let nine = FieldValue::Text("9".to_string());
        let ten = FieldValue::Text("10".to_string());
        assert_eq!(compare_values(&nine, &ten), Ordering::Less);

        let decimal = FieldValue::Text("-2.5".to_string());
        assert_eq!(compare_values(&decimal, &nine), Ordering::Less);
    }

    #[test]
    fn test_partially_numeric_text_sorts_after_numbers() {
        // "10 units" is not a clean decimal, so it ranks with other text
        let a = FieldValue::Text("10 units".to_string());
        let b = FieldValue::Text("9".to_string());
        assert_eq!(compare_values(&a, &b), Ordering::Greater);
        assert_eq!(
            compare_values(&a, &FieldValue::Text("1x".to_string())),
            Ordering::Less
        );

        let inf = FieldValue::Text("inf".to_string());
        let one = FieldValue::Text("1".to_string());
        assert_eq!(compare_values(&one, &inf), Ordering::Less);
    }

    #[test]
    fn test_collate_ignores_case_first() {
        assert_eq!(collate("alpha", "Beta"), Ordering::Less);
        assert_eq!(collate("Gamma", "beta"), Ordering::Greater);
        assert_eq!(collate("a", "A"), Ordering::Less);
        assert_eq!(collate("Alpha", "Alpha"), Ordering::Equal);
        assert_eq!(collate("Al", "Alpha"), Ordering::Less);
    }

    #[test]
    fn test_dates_compare_chronologically() {
        let early = FieldValue::from_json(&json!("2023-12-31"));
        let late = FieldValue::from_json(&json!("2024-01-01T08:30:00"));
        assert_eq!(compare_values(&early, &late), Ordering::Less);
    }

    #[test]
    fn test_numbers_and_numeric_text_compare_as_numbers() {
        let five = FieldValue::Number(5.0);
        let ten = FieldValue::Text("10".to_string());
        assert_eq!(compare_values(&five, &ten), Ordering::Less);
        assert_eq!(compare_values(&ten, &five), Ordering::Greater);
        assert_eq!(
            compare_values(&FieldValue::Number(10.0), &FieldValue::Text("10.0".to_string())),
            Ordering::Equal
        );
    }

    #[test]
    fn test_kinds_rank_before_content() {
        let number = FieldValue::Number(5.0);
        let date = FieldValue::from_json(&json!("2024-01-01"));
        let flag = FieldValue::Bool(false);
        let text = FieldValue::Text("apple".to_string());
        assert_eq!(compare_values(&number, &date), Ordering::Less);
        assert_eq!(compare_values(&date, &flag), Ordering::Less);
        assert_eq!(compare_values(&flag, &text), Ordering::Less);
        assert_eq!(compare_values(&text, &number), Ordering::Greater);
    }

    #[test]
    fn test_compare_values_is_a_total_order() {
        let values: Vec<FieldValue> = [
            json!("10"),
            json!("9"),
            json!("1x"),
            json!("1A"),
            json!("1a"),
            json!(5),
            json!(-2.5),
            json!(".5"),
            json!("10 units"),
            json!("A10"),
            json!("a9"),
            json!("2024-03-01"),
            json!("2024-03-01T08:30:00Z"),
            json!("2023-12-31 23:59:59"),
            json!(true),
            json!(false),
            json!("inf"),
            json!("NaN"),
            json!(""),
            json!("Ärger"),
            json!("arger"),
            json!(["x"]),
        ]
        .iter()
        .map(FieldValue::from_json)
        .collect();

        for a in &values {
            assert_eq!(compare_values(a, a), Ordering::Equal);
            for b in &values {
                assert_eq!(compare_values(a, b), compare_values(b, a).reverse());
                for c in &values {
                    let ab = compare_values(a, b);
                    if ab != Ordering::Greater && compare_values(b, c) == ab {
                        assert_eq!(compare_values(a, c), ab, "{:?} {:?} {:?}", a, b, c);
                    }
                }
            }
        }
    }

    #[test]
    fn test_dates_keep_source_text() {
        let cases = [
            "2024-03-01",
            "2024-03-01T08:30:00",
            "2024-03-01T08:30:00.250",
            "2024-03-01 08:30:00",
            "2024-03-01T08:30:00.250Z",
            "2024-03-01T08:30:00+08:00",
        ];
        for source in cases {
            let value = FieldValue::from_json(&json!(source));
            assert!(matches!(value, FieldValue::Date(..) | FieldValue::DateTime(..)));
            assert_eq!(value.to_string(), source);
            assert_eq!(value.search_text().as_deref(), Some(source));
        }
    }

    #[test]
    fn test_offset_date_times_compare_in_utc() {
        let manila = FieldValue::from_json(&json!("2024-03-01T08:30:00+08:00"));
        let utc = FieldValue::from_json(&json!("2024-03-01T01:00:00Z"));
        assert_eq!(compare_values(&manila, &utc), Ordering::Less);
    }
}
