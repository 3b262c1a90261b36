//! Scalar cell values.
//!
//! A [`DataValue`] is one cell of a tabular dataset. The explicit `Null`
//! variant stands for a missing marker, whatever the source used for it
//! (SQL `NULL`, an empty spreadsheet cell, a cell absent from the row).

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// A value in a dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DataValue {
    /// Null/missing value
    Null,
    /// String value
    String(String),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// Date or timestamp read from a typed source (ISO 8601 string)
    Timestamp(String),
}

impl DataValue {
    /// Returns true if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, DataValue::Null)
    }

    /// Returns true if this value is null or its text trims to nothing.
    pub fn is_blank(&self) -> bool {
        match self {
            DataValue::Null => true,
            DataValue::String(s) | DataValue::Timestamp(s) => s.trim().is_empty(),
            DataValue::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            DataValue::Null => "null",
            DataValue::String(_) => "string",
            DataValue::Int(_) => "int64",
            DataValue::Float(_) => "float64",
            DataValue::Bool(_) => "boolean",
            DataValue::Timestamp(_) => "timestamp",
        }
    }

    /// Attempts to get this value as a string.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            DataValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to get this value as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            DataValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Attempts to get this value as a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            DataValue::Float(f) => Some(*f),
            DataValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Attempts to get this value as a timestamp string.
    pub fn as_timestamp(&self) -> Option<&str> {
        match self {
            DataValue::Timestamp(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the text form of this value, or `None` for null.
    pub fn to_text(&self) -> Option<String> {
        match self {
            DataValue::Null => None,
            other => Some(other.to_string()),
        }
    }

    /// Total order used to sort issues by entity key.
    ///
    /// Numbers compare numerically and come first, then booleans, then text.
    /// Null sorts last.
    pub fn sort_cmp(&self, other: &DataValue) -> Ordering {
        match (self, other) {
            (DataValue::String(a) | DataValue::Timestamp(a), DataValue::String(b) | DataValue::Timestamp(b)) => {
                a.cmp(b)
            }
            (DataValue::Bool(a), DataValue::Bool(b)) => a.cmp(b),
            (DataValue::Int(a), DataValue::Int(b)) => a.cmp(b),
            (DataValue::Int(a), DataValue::Float(b)) => cmp_int_float(*a, *b),
            (DataValue::Float(a), DataValue::Int(b)) => cmp_int_float(*b, *a).reverse(),
            _ => match (self.as_float(), other.as_float()) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                _ => self.sort_rank().cmp(&other.sort_rank()),
            },
        }
    }

    fn sort_rank(&self) -> u8 {
        match self {
            DataValue::Int(_) | DataValue::Float(_) => 0,
            DataValue::Bool(_) => 1,
            DataValue::String(_) | DataValue::Timestamp(_) => 2,
            DataValue::Null => 3,
        }
    }
}

/// Compares an integer with a float without rounding the integer.
fn cmp_int_float(int: i64, float: f64) -> Ordering {
    // 2^63 is exactly representable; every i64 lies in [-2^63, 2^63).
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;

    if float.is_nan() {
        return (int as f64).total_cmp(&float);
    }
    if float >= LIMIT {
        return Ordering::Less;
    }
    if float < -LIMIT {
        return Ordering::Greater;
    }

    let whole = float.trunc();
    let fraction = float - whole;
    int.cmp(&(whole as i64)).then(if fraction > 0.0 {
        Ordering::Less
    } else if fraction < 0.0 {
        Ordering::Greater
    } else {
        Ordering::Equal
    })
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Null => Ok(()),
            DataValue::String(s) | DataValue::Timestamp(s) => f.write_str(s),
            DataValue::Int(i) => write!(f, "{}", i),
            DataValue::Float(x) => write!(f, "{}", x),
            DataValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<String> for DataValue {
    fn from(s: String) -> Self {
        DataValue::String(s)
    }
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        DataValue::String(s.to_string())
    }
}

impl From<i32> for DataValue {
    fn from(i: i32) -> Self {
        DataValue::Int(i64::from(i))
    }
}

impl From<i64> for DataValue {
    fn from(i: i64) -> Self {
        DataValue::Int(i)
    }
}

impl From<f64> for DataValue {
    fn from(f: f64) -> Self {
        DataValue::Float(f)
    }
}

impl From<bool> for DataValue {
    fn from(b: bool) -> Self {
        DataValue::Bool(b)
    }
}

impl<T: Into<DataValue>> From<Option<T>> for DataValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(DataValue::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_large_integers_compare_exactly() {
        let a = DataValue::Int(9_007_199_254_740_992);
        let b = DataValue::Int(9_007_199_254_740_993);

        assert_eq!(a.sort_cmp(&b), Ordering::Less);
        assert_eq!(b.sort_cmp(&a), Ordering::Greater);
        assert_eq!(a.sort_cmp(&a.clone()), Ordering::Equal);
    }

    #[test]
    fn test_int_float_comparison() {
        let float = DataValue::Float(9_007_199_254_740_992.0);

        assert_eq!(DataValue::Int(9_007_199_254_740_993).sort_cmp(&float), Ordering::Greater);
        assert_eq!(float.sort_cmp(&DataValue::Int(9_007_199_254_740_993)), Ordering::Less);
        assert_eq!(DataValue::Int(5).sort_cmp(&DataValue::Float(5.0)), Ordering::Equal);
        assert_eq!(DataValue::Int(-2).sort_cmp(&DataValue::Float(-2.5)), Ordering::Greater);
        assert_eq!(DataValue::Int(2).sort_cmp(&DataValue::Float(2.5)), Ordering::Less);
        assert_eq!(DataValue::Int(i64::MAX).sort_cmp(&DataValue::Float(1e19)), Ordering::Less);
        assert_eq!(DataValue::Int(i64::MIN).sort_cmp(&DataValue::Float(-1e19)), Ordering::Greater);
    }

    #[test]
    fn test_blank_detection() {
        assert!(DataValue::Null.is_blank());
        assert!(DataValue::from("   ").is_blank());
        assert!(DataValue::from("").is_blank());
        assert!(!DataValue::from(" x ").is_blank());
        assert!(!DataValue::Int(0).is_blank());
        assert!(DataValue::Float(f64::NAN).is_blank());
    }

    #[test]
    fn test_display() {
        assert_eq!(DataValue::Null.to_string(), "");
        assert_eq!(DataValue::Int(-5).to_string(), "-5");
        assert_eq!(DataValue::Float(0.5).to_string(), "0.5");
        assert_eq!(DataValue::from("P1").to_text(), Some("P1".to_string()));
        assert_eq!(DataValue::Null.to_text(), None);
    }

    #[test]
    fn test_sort_order() {
        let mut keys = vec![
            DataValue::Null,
            DataValue::from("B"),
            DataValue::Int(10),
            DataValue::from("A"),
            DataValue::Float(2.5),
        ];
        keys.sort_by(|a, b| a.sort_cmp(b));
        assert_eq!(
            keys,
            vec![
                DataValue::Float(2.5),
                DataValue::Int(10),
                DataValue::from("A"),
                DataValue::from("B"),
                DataValue::Null,
            ]
        );
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(DataValue::from(None::<i64>), DataValue::Null);
        assert_eq!(DataValue::from(Some("x")), DataValue::from("x"));
    }

    #[test]
    fn test_serialize_untagged() {
        let json = serde_json::to_string(&vec![DataValue::Null, DataValue::Int(3), DataValue::from("a")])
            .unwrap();
        assert_eq!(json, r#"[null,3,"a"]"#);
    }
}
