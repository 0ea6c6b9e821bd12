//! JSON value types.
//!
//! [`Value`] is the tagged union produced by the parser and consumed by the
//! serializer. Integers and doubles are distinct variants; the numeric
//! accessors convert between them only when no information is lost.
//!
//! Read access never fails: projections return `None` on a variant
//! mismatch, and indexing with `[]` yields a shared `Null` sentinel for a
//! missing element or member.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;

/// Object representation: unique keys, iterated in byte order.
pub type Map = BTreeMap<String, Value>;

/// Returned by `Index` when the element or member is absent.
static ABSENT: Value = Value::Null;

/// A JSON value.
///
/// A tree of values owns its children exclusively; JSON has no cycles.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// JSON null literal
    #[default]
    Null,
    /// JSON boolean (true/false)
    Bool(bool),
    /// Number written without fraction or exponent
    Int(i64),
    /// Number written with a fraction and/or exponent
    Double(f64),
    /// JSON string (always valid UTF-8)
    String(String),
    /// JSON array of values
    Array(Vec<Value>),
    /// JSON object
    Object(Map),
}

/// Variant discriminator for [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// `Value::Null`
    Null,
    /// `Value::Bool`
    Bool,
    /// `Value::Int`
    Int,
    /// `Value::Double`
    Double,
    /// `Value::String`
    String,
    /// `Value::Array`
    Array,
    /// `Value::Object`
    Object,
}

impl ValueType {
    /// Lowercase name, as used in diagnostics and the CLI.
    pub const fn name(&self) -> &'static str {
        match self {
            ValueType::Null => "null",
            ValueType::Bool => "bool",
            ValueType::Int => "int",
            ValueType::Double => "double",
            ValueType::String => "string",
            ValueType::Array => "array",
            ValueType::Object => "object",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    /// Returns the variant discriminator.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Bool(_) => ValueType::Bool,
            Value::Int(_) => ValueType::Int,
            Value::Double(_) => ValueType::Double,
            Value::String(_) => ValueType::String,
            Value::Array(_) => ValueType::Array,
            Value::Object(_) => ValueType::Object,
        }
    }

    /// Returns the type name as a string for error messages.
    pub fn type_name(&self) -> &'static str {
        self.value_type().name()
    }

    /// Returns true if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true if this is a boolean value.
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns true for both `Int` and `Double`.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Double(_))
    }

    /// Returns true if this is a string value.
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns true if this is an array value.
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns true if this is an object value.
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Returns the boolean value if this is a Bool, None otherwise.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer view of a number.
    ///
    /// A `Double` converts only when it has no fractional part and lies in
    /// `[-2^63, 2^63)`, so the conversion is exact.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Double(d) => double_to_i64(*d),
            _ => None,
        }
    }

    /// Floating-point view of a number. `Int` widens to the nearest `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Double(d) => Some(*d),
            #[allow(clippy::cast_precision_loss)]
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Returns a reference to the string if this is a String, None otherwise.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns a reference to the array if this is an Array, None otherwise.
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Returns a reference to the object if this is an Object, None otherwise.
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Get a value from an object by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Get a value from an array by index.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        match self {
            Value::Array(arr) => arr.get(index),
            _ => None,
        }
    }
}

// 2^63 is exactly representable; every double in [-2^63, 2^63) fits i64.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

#[allow(clippy::cast_possible_truncation)]
fn double_to_i64(d: f64) -> Option<i64> {
    if d.is_finite() && d.trunc() == d && (-I64_BOUND..I64_BOUND).contains(&d) {
        Some(d as i64)
    } else {
        None
    }
}

impl Index<usize> for Value {
    type Output = Value;

    /// Array element, or `Null` when out of range or not an array.
    fn index(&self, index: usize) -> &Value {
        self.get_index(index).unwrap_or(&ABSENT)
    }
}

impl Index<&str> for Value {
    type Output = Value;

    /// Object member, or `Null` when missing or not an object.
    fn index(&self, key: &str) -> &Value {
        self.get(key).unwrap_or(&ABSENT)
    }
}

impl fmt::Display for Value {
    /// Compact canonical JSON.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&super::serializer::stringify(self, false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_value_types() {
        assert!(Value::Null.is_null());
        assert!(Value::Bool(true).is_bool());
        assert!(Value::Int(42).is_number());
        assert!(Value::Double(4.2).is_number());
        assert!(Value::String("test".to_string()).is_string());
        assert!(Value::Array(vec![]).is_array());
        assert!(Value::Object(Map::new()).is_object());
    }

    #[test]
    fn test_value_type_discriminator() {
        assert_eq!(Value::Null.value_type(), ValueType::Null);
        assert_eq!(Value::Int(1).value_type(), ValueType::Int);
        assert_eq!(Value::Double(1.0).value_type(), ValueType::Double);
        assert_eq!(Value::Object(Map::new()).type_name(), "object");
        assert_eq!(ValueType::Bool.to_string(), "bool");
    }

    #[test]
    fn test_json_value_accessors() {
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Int(42).as_i64(), Some(42));
        assert_eq!(Value::String("test".to_string()).as_str(), Some("test"));
        assert_eq!(Value::Null.as_bool(), None);
        assert_eq!(Value::Int(1234).as_str(), None);
    }

    #[test]
    fn test_int_from_double_is_lossless_only() {
        assert_eq!(Value::Double(1234.0).as_i64(), Some(1234));
        assert_eq!(Value::Double(-0.0).as_i64(), Some(0));
        assert_eq!(Value::Double(1234.1).as_i64(), None);
        assert_eq!(Value::Double(f64::NAN).as_i64(), None);
        assert_eq!(Value::Double(f64::INFINITY).as_i64(), None);
        assert_eq!(Value::Double(I64_BOUND).as_i64(), None);
        assert_eq!(Value::Double(-I64_BOUND).as_i64(), Some(i64::MIN));
    }

    #[test]
    fn test_double_from_int_always_succeeds() {
        assert_eq!(Value::Int(1234).as_f64(), Some(1234.0));
        assert_eq!(Value::Double(1234.1).as_f64(), Some(1234.1));
        assert_eq!(Value::Int(i64::MAX).as_f64(), Some(I64_BOUND));
        assert_eq!(Value::String("1".into()).as_f64(), None);
    }

    #[test]
    fn test_indexing_never_panics() {
        let arr = Value::Array(vec![Value::Int(1), Value::String("2".into())]);
        assert_eq!(arr[0].as_i64(), Some(1));
        assert_eq!(arr[1].as_str(), Some("2"));
        assert!(arr[2].is_null());
        assert!(Value::Int(1)[0].is_null());

        let mut map = Map::new();
        map.insert("1".to_string(), Value::Int(1));
        let obj = Value::Object(map);
        assert_eq!(obj["1"].as_i64(), Some(1));
        assert!(obj["3"].is_null());
        assert!(obj.get("3").is_none());
        assert!(Value::Int(1)["1"].is_null());
    }

    #[test]
    fn test_json_value_equality() {
        let obj1: Map = [("a".to_string(), Value::Int(1))].into_iter().collect();
        let obj2: Map = [("a".to_string(), Value::Int(1))].into_iter().collect();
        assert_eq!(Value::Object(obj1), Value::Object(obj2));
        assert_ne!(Value::Int(1), Value::Double(1.0));
    }
}
