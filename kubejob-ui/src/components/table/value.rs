//! Raw cell values and row access.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// A raw, comparable cell value.
///
/// Sorting always compares these, never rendered output. The order is
/// total: `Null < Bool < numbers < Text`, with integers and floats compared
/// numerically against each other.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Int(_) | Value::Float(_) => 2,
            Value::Text(_) => 3,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Int(a), Value::Float(b)) => cmp_int_float(*a, *b),
            (Value::Float(a), Value::Int(b)) => cmp_int_float(*b, *a).reverse(),
            (Value::Float(a), Value::Float(b)) => cmp_float(*a, *b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// `f64::total_cmp` with both zeros equal, matching how integers see them.
fn cmp_float(a: f64, b: f64) -> Ordering {
    if a == b {
        Ordering::Equal
    } else {
        a.total_cmp(&b)
    }
}

/// Exact comparison; `as f64` would round integers above 2^53.
fn cmp_int_float(int: i64, float: f64) -> Ordering {
    // 2^63, the first float past i64::MAX.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;

    if float.is_nan() {
        // total_cmp places negative NaN below every number, positive above.
        return if float.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if float >= LIMIT {
        return Ordering::Less;
    }
    if float < -LIMIT {
        return Ordering::Greater;
    }

    let whole = float.trunc();
    match int.cmp(&(whole as i64)) {
        Ordering::Equal => cmp_float(whole, float),
        ordering => ordering,
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Text(s.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(n) => Value::Int(n),
            Err(_) => Value::Float(n as f64),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

impl From<&serde_json::Value> for Value {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::from(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => Value::Text(s.clone()),
            other => Value::Text(other.to_string()),
        }
    }
}

/// A row the table can sort and display.
///
/// `field` is the raw lookup used for sorting and for columns without a
/// renderer. Unknown keys yield [`Value::Null`].
pub trait TableRow {
    fn field(&self, key: &str) -> Value;
}

impl TableRow for BTreeMap<String, Value> {
    fn field(&self, key: &str) -> Value {
        self.get(key).cloned().unwrap_or_default()
    }
}

impl TableRow for serde_json::Map<String, serde_json::Value> {
    fn field(&self, key: &str) -> Value {
        self.get(key).map(Value::from).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_cross_kind_order() {
        let mut values = vec![
            Value::from("b"),
            Value::Float(2.5),
            Value::Null,
            Value::Int(2),
            Value::Bool(true),
            Value::from("a"),
            Value::Int(3),
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                Value::Null,
                Value::Bool(true),
                Value::Int(2),
                Value::Float(2.5),
                Value::Int(3),
                Value::from("a"),
                Value::from("b"),
            ]
        );
    }

    #[test]
    fn test_int_float_equality() {
        assert_eq!(Value::Int(1), Value::Float(1.0));
        assert_eq!(Value::Int(0), Value::Float(-0.0));
        assert_eq!(Value::Float(0.0), Value::Float(-0.0));
    }

    #[test]
    fn test_int_float_order_is_exact_past_f64_precision() {
        let big = 1_i64 << 53;
        assert!(Value::Int(big + 1) > Value::Float(big as f64));
        assert_eq!(Value::Int(big), Value::Float(big as f64));
        assert!(Value::Int(big + 1) > Value::Int(big));

        assert!(Value::Int(i64::MAX) < Value::Float(9_223_372_036_854_775_808.0));
        assert!(Value::Int(i64::MIN) == Value::Float(-9_223_372_036_854_775_808.0));
        assert!(Value::Int(i64::MIN) > Value::Float(f64::NEG_INFINITY));
        assert!(Value::Int(2) < Value::Float(2.5));
        assert!(Value::Int(-2) > Value::Float(-2.5));
        assert!(Value::Int(i64::MAX) < Value::Float(f64::NAN));
    }

    #[test]
    fn test_mixed_numbers_sort_consistently() {
        let big = 1_i64 << 53;
        let mut values = vec![
            Value::Int(big + 1),
            Value::Float(big as f64),
            Value::Int(big),
            Value::Float(0.5),
            Value::Int(-1),
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                Value::Int(-1),
                Value::Float(0.5),
                Value::Float(big as f64),
                Value::Int(big),
                Value::Int(big + 1),
            ]
        );
        assert!(matches!(values[2], Value::Float(_)));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::Int(-4).to_string(), "-4");
        assert_eq!(Value::from("x").to_string(), "x");
    }

    #[test]
    fn test_json_map_row() {
        let row = json!({"k": 1, "name": "a", "big": u64::MAX, "nested": [1]});
        let map = row.as_object().unwrap();
        assert_eq!(map.field("k"), Value::Int(1));
        assert_eq!(map.field("name"), Value::from("a"));
        assert!(matches!(map.field("big"), Value::Float(_)));
        assert_eq!(map.field("nested"), Value::from("[1]"));
        assert!(map.field("missing").is_null());
    }
}
