//!
//! Converter Catalog
//!
//! Each `TypeConverter` is associated with one host type and answers two
//! questions: can it build its type *from* a given source type, and can it
//! turn a value of its type *into* a given target type. The coercion bridge
//! asks the target's converter first and the source's converter second.
//!
//! The catalog is explicit and ordered. The built-in entries cover the ten
//! numeric kinds and `string`; embedders register further converters, and a
//! registration for an already-covered type replaces the built-in one.
//!

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use moonlet_std_core::{HostType, Number, NumberKind, STRING_NAME, TypeHandle, Value};

use crate::error::RuntimeError;

pub trait TypeConverter: Send + Sync {
    /// Qualified name of the type this converter belongs to
    fn type_name(&self) -> &str;

    fn can_convert_from(&self, source: &HostType) -> bool;

    fn convert_from(&self, value: &Value, target: &TypeHandle) -> Result<Value, RuntimeError>;

    fn can_convert_to(&self, _target: &HostType) -> bool {
        false
    }

    fn convert_to(&self, value: &Value, target: &TypeHandle) -> Result<Value, RuntimeError> {
        Err(RuntimeError::type_conversion(value, target))
    }
}

/// Converter for one numeric kind
#[derive(Debug, Clone, Copy)]
pub struct NumberConverter {
    kind: NumberKind,
}

impl NumberConverter {
    pub fn new(kind: NumberKind) -> Self {
        Self { kind }
    }
}

impl TypeConverter for NumberConverter {
    fn type_name(&self) -> &str {
        self.kind.name()
    }

    fn can_convert_from(&self, source: &HostType) -> bool {
        source.number_kind().is_some() || source.is_bool() || source.name() == STRING_NAME
    }

    fn convert_from(&self, value: &Value, target: &TypeHandle) -> Result<Value, RuntimeError> {
        let converted = match value {
            Value::Number(n) => n.cast(self.kind),
            Value::Bool(b) => Number::from_i128(*b as i128, self.kind),
            Value::Str(s) => Number::parse(s, self.kind),
            _ => None,
        };
        converted
            .map(Value::Number)
            .ok_or_else(|| RuntimeError::type_conversion(value, target))
    }

    fn can_convert_to(&self, target: &HostType) -> bool {
        target.name() == STRING_NAME || target.number_kind().is_some()
    }

    fn convert_to(&self, value: &Value, target: &TypeHandle) -> Result<Value, RuntimeError> {
        let Value::Number(n) = value else {
            return Err(RuntimeError::type_conversion(value, target));
        };
        match target.number_kind() {
            Some(kind) => n
                .cast(kind)
                .map(Value::Number)
                .ok_or_else(|| RuntimeError::type_conversion(value, target)),
            None => Ok(Value::string(n.to_string())),
        }
    }
}

/// Converter for `string`
#[derive(Debug, Clone, Copy, Default)]
pub struct StringConverter;

impl TypeConverter for StringConverter {
    fn type_name(&self) -> &str {
        STRING_NAME
    }

    fn can_convert_from(&self, source: &HostType) -> bool {
        source.number_kind().is_some() || source.is_bool()
    }

    fn convert_from(&self, value: &Value, target: &TypeHandle) -> Result<Value, RuntimeError> {
        match value {
            Value::Number(_) | Value::Bool(_) => Ok(Value::string(value.to_string())),
            _ => Err(RuntimeError::type_conversion(value, target)),
        }
    }

    fn can_convert_to(&self, target: &HostType) -> bool {
        target.number_kind().is_some()
    }

    fn convert_to(&self, value: &Value, target: &TypeHandle) -> Result<Value, RuntimeError> {
        let parsed = match (value, target.number_kind()) {
            (Value::Str(s), Some(kind)) => Number::parse(s, kind),
            _ => None,
        };
        parsed
            .map(Value::Number)
            .ok_or_else(|| RuntimeError::type_conversion(value, target))
    }
}

#[derive(Clone)]
pub struct ConverterCatalog {
    converters: IndexMap<String, Arc<dyn TypeConverter>>,
}

impl ConverterCatalog {
    pub fn empty() -> Self {
        Self {
            converters: IndexMap::new(),
        }
    }

    /// Catalog with the numeric and string converters
    pub fn with_builtins() -> Self {
        let mut catalog = Self::empty();
        for kind in NumberKind::ALL {
            catalog.register(Arc::new(NumberConverter::new(kind)));
        }
        catalog.register(Arc::new(StringConverter));
        catalog
    }

    /// Add a converter, returning the one it replaces for the same type
    pub fn register(
        &mut self,
        converter: Arc<dyn TypeConverter>,
    ) -> Option<Arc<dyn TypeConverter>> {
        self.converters
            .insert(converter.type_name().to_string(), converter)
    }

    pub fn get(&self, type_name: &str) -> Option<&Arc<dyn TypeConverter>> {
        self.converters.get(type_name)
    }

    /// Types with a converter, in registration order
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.converters.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }
}

impl Default for ConverterCatalog {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for ConverterCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.type_names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moonlet_std_core::{bool_type, number_type, string_type};

    #[test]
    fn test_builtin_catalog_order() {
        let catalog = ConverterCatalog::with_builtins();
        let names: Vec<&str> = catalog.type_names().collect();
        assert_eq!(names.len(), 11);
        assert_eq!(names.first(), Some(&"i8"));
        assert_eq!(names.last(), Some(&"string"));
    }

    #[test]
    fn test_number_converter_from_string_and_bool() {
        let target = number_type(NumberKind::I32);
        let conv = NumberConverter::new(NumberKind::I32);

        assert!(conv.can_convert_from(string_type()));
        assert!(conv.can_convert_from(bool_type()));
        assert_eq!(
            conv.convert_from(&Value::from(" 42"), target).expect("parses"),
            Value::Number(Number::I32(42))
        );
        assert_eq!(
            conv.convert_from(&Value::Bool(true), target).expect("converts"),
            Value::Number(Number::I32(1))
        );
        assert!(conv.convert_from(&Value::from("4.5"), target).is_err());
    }

    #[test]
    fn test_number_converter_to_string() {
        let conv = NumberConverter::new(NumberKind::F64);
        assert!(conv.can_convert_to(string_type()));
        assert!(!conv.can_convert_to(bool_type()));
        assert_eq!(
            conv.convert_to(&Value::float(1.5), string_type()).expect("formats"),
            Value::from("1.5")
        );
    }

    #[test]
    fn test_string_converter() {
        let conv = StringConverter;
        assert!(conv.can_convert_from(number_type(NumberKind::U64)));
        assert!(!conv.can_convert_from(string_type()));
        assert_eq!(
            conv.convert_to(&Value::from("0x10"), number_type(NumberKind::U8)).expect("parses"),
            Value::Number(Number::U8(16))
        );
    }

    struct Shouting;

    impl TypeConverter for Shouting {
        fn type_name(&self) -> &str {
            STRING_NAME
        }

        fn can_convert_from(&self, _source: &HostType) -> bool {
            true
        }

        fn convert_from(&self, value: &Value, _target: &TypeHandle) -> Result<Value, RuntimeError> {
            Ok(Value::string(value.to_string().to_uppercase()))
        }
    }

    #[test]
    fn test_register_replaces_builtin() {
        let mut catalog = ConverterCatalog::with_builtins();
        let replaced = catalog.register(Arc::new(Shouting));
        assert!(replaced.is_some());
        assert_eq!(catalog.len(), 11);

        let conv = catalog.get(STRING_NAME).expect("string converter");
        assert_eq!(
            conv.convert_from(&Value::Bool(true), string_type()).expect("converts"),
            Value::from("TRUE")
        );
    }
}
