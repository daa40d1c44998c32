//!
//! Runtime Value Representation
//!
//! A `Value` is what flows through compiled script code. `Nil` doubles as the
//! absence marker: a missing result, an out-of-range argument and a null host
//! reference all read as `Nil`.
//!
//! `Multi` is a nested result sequence, boxed since the sequence itself holds
//! values inline. Only the runtime layer's multi-value protocol creates and
//! consumes it; everywhere else it is an ordinary value of type `results`.
//!
//! Cloning a `Value` never copies referenced data: strings, tables, arrays and
//! host objects are shared through `Arc`.
//!

use std::fmt;
use std::sync::Arc;

use crate::array::TypedArray;
use crate::number::Number;
use crate::object::HostObject;
use crate::results::ResultSequence;
use crate::table::TableRef;
use crate::types::{
    TypeHandle, array_type, bool_type, number_type, results_type, string_type, table_type,
};

#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Number(Number),
    Str(Arc<str>),
    Table(TableRef),
    Array(TypedArray),
    Multi(Box<ResultSequence>),
    Object(HostObject),
}

impl Value {
    pub fn int(value: i64) -> Value {
        Value::Number(Number::I64(value))
    }

    pub fn float(value: f64) -> Value {
        Value::Number(Number::F64(value))
    }

    pub fn string(value: impl AsRef<str>) -> Value {
        Value::Str(Arc::from(value.as_ref()))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_multi(&self) -> Option<&ResultSequence> {
        match self {
            Value::Multi(seq) => Some(&**seq),
            _ => None,
        }
    }

    /// Runtime host type of the value; `None` for `Nil`
    pub fn type_handle(&self) -> Option<TypeHandle> {
        match self {
            Value::Nil => None,
            Value::Bool(_) => Some(bool_type().clone()),
            Value::Number(n) => Some(number_type(n.kind()).clone()),
            Value::Str(_) => Some(string_type().clone()),
            Value::Table(_) => Some(table_type().clone()),
            Value::Array(_) => Some(array_type().clone()),
            Value::Multi(_) => Some(results_type().clone()),
            Value::Object(obj) => Some(obj.type_handle().clone()),
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Number(n) => n.kind().name(),
            Value::Str(_) => "string",
            Value::Table(_) => "table",
            Value::Array(_) => "array",
            Value::Multi(_) => "results",
            Value::Object(obj) => obj.type_handle().name(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Table(a), Value::Table(b)) => a.ptr_eq(b),
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Multi(a), Value::Multi(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::Str(s) => f.write_str(s),
            Value::Table(t) => write!(f, "table: {:p}", t.as_ptr()),
            Value::Array(a) => write!(f, "{}[{}]", a.element_type().name(), a.len()),
            Value::Multi(seq) => {
                f.write_str("(")?;
                for (i, value) in seq.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                f.write_str(")")
            }
            Value::Object(obj) => write!(f, "{}: {:p}", obj.type_handle().name(), obj.as_ptr()),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::int(value as i64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::float(value)
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::string(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(Arc::from(value))
    }
}

impl From<TableRef> for Value {
    fn from(value: TableRef) -> Self {
        Value::Table(value)
    }
}

impl From<TypedArray> for Value {
    fn from(value: TypedArray) -> Self {
        Value::Array(value)
    }
}

impl From<ResultSequence> for Value {
    fn from(value: ResultSequence) -> Self {
        Value::Multi(Box::new(value))
    }
}

impl From<HostObject> for Value {
    fn from(value: HostObject) -> Self {
        Value::Object(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Nil, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::number::NumberKind;
    use crate::results;

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Nil.type_name(), "nil");
        assert_eq!(Value::from(3).type_name(), "i64");
        assert_eq!(Value::Number(Number::U8(3)).type_name(), "u8");
        assert_eq!(Value::from("x").type_name(), "string");
        assert_eq!(Value::from(results![1, 2]).type_name(), "results");
    }

    #[test]
    fn test_type_handle_matches_number_kind() {
        let value = Value::Number(Number::F32(1.0));
        let handle = value.type_handle().expect("number has a type");
        assert_eq!(handle.number_kind(), Some(NumberKind::F32));
        assert!(Value::Nil.type_handle().is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Nil.to_string(), "nil");
        assert_eq!(Value::float(2.5).to_string(), "2.5");
        assert_eq!(Value::from(results![1, "a", Value::Nil]).to_string(), "(1, a, nil)");
    }

    #[test]
    fn test_equality_is_identity_for_tables() {
        let a = TableRef::new();
        let b = TableRef::new();
        assert_eq!(Value::Table(a.clone()), Value::Table(a));
        assert_ne!(Value::Table(b), Value::Table(TableRef::new()));
        assert_ne!(Value::int(1), Value::Number(Number::I32(1)));
    }

    #[test]
    fn test_nested_sequences() {
        let value = Value::from(results![1, results![2, results![3]]]);
        let outer = value.as_multi().expect("outer sequence");
        let inner = outer[1].as_multi().expect("inner sequence");
        assert_eq!(inner[1], Value::from(results![3]));
        assert_eq!(value.to_string(), "(1, (2, (3)))");
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Value::from(None::<i64>), Value::Nil);
        assert_eq!(Value::from(Some("x")), Value::from("x"));
    }
}
