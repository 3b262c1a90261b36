//! Cell coercion helpers.
//!
//! Numeric coercion accepts base-10 integer and decimal literals with an
//! optional sign and exponent, using `.` as the decimal separator. It does
//! not depend on the locale and rejects `inf`, `nan` and digit grouping.

use chrono::NaiveDate;
use pipecheck_core::DataValue;
use regex::Regex;
use std::sync::LazyLock;

/// Date formats accepted by the `date_format` rule, tried in order.
pub const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d-%m-%Y"];

static NUMERIC_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$").expect("numeric literal pattern")
});

/// Coerces a cell to a number.
///
/// Returns `None` for nulls and for anything that is not a numeric literal.
pub fn to_number(value: &DataValue) -> Option<f64> {
    match value {
        DataValue::Int(i) => Some(*i as f64),
        DataValue::Float(f) if !f.is_nan() => Some(*f),
        DataValue::String(s) => {
            let trimmed = s.trim();
            if NUMERIC_LITERAL.is_match(trimmed) {
                trimmed.parse::<f64>().ok()
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Coerces every cell of a column.
pub fn to_numbers<'a>(values: impl IntoIterator<Item = &'a DataValue>) -> Vec<Option<f64>> {
    values.into_iter().map(to_number).collect()
}

/// Returns true if the cell holds text that fails numeric coercion.
///
/// Blank cells are not non-numeric; they are the concern of `null_warning`.
pub fn is_non_numeric(value: &DataValue) -> bool {
    !value.is_blank() && to_number(value).is_none()
}

/// Parses text as a date in one of [`DATE_FORMATS`].
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}

/// Returns true if the cell is a date in an accepted format.
///
/// Timestamps read from a typed source are accepted as they are.
pub fn is_valid_date(value: &DataValue) -> bool {
    match value {
        DataValue::Timestamp(_) => true,
        DataValue::String(s) => parse_date(s).is_some(),
        _ => false,
    }
}
