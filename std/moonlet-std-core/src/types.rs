//!
//! Host Type Descriptors
//!
//! A `HostType` describes one static type of the host: its qualified name,
//! whether it has value semantics (and so a zero/default instance), and the
//! names of the types it is assignable to besides itself.
//!
//! The built-in types form the default binding context that host type
//! resolution tries first:
//!
//! - `bool` and the ten numeric kinds (`i8` .. `f64`): value types
//! - `string`, `table`, `array`, `results`: reference types
//! - `object`: the universal reference type, assignable from every value
//!

use std::fmt;
use std::sync::{Arc, LazyLock};

use crate::number::NumberKind;
use crate::value::Value;

pub type TypeHandle = Arc<HostType>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// Non-nullable; absent converts to the default instance
    Value,
    /// Nullable; absent stays absent
    Reference,
}

pub struct HostType {
    name: String,
    kind: TypeKind,
    default: Option<fn() -> Value>,
    bases: Vec<String>,
}

impl HostType {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
            bases: Vec::new(),
        }
    }

    /// A value type whose default instance is produced by `default`
    pub fn value(name: impl Into<String>, default: fn() -> Value) -> TypeHandle {
        Self::new(name, TypeKind::Value).with_default(default).into_handle()
    }

    pub fn reference(name: impl Into<String>) -> TypeHandle {
        Self::new(name, TypeKind::Reference).into_handle()
    }

    pub fn with_default(mut self, default: fn() -> Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.bases.push(base.into());
        self
    }

    pub fn into_handle(self) -> TypeHandle {
        Arc::new(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn is_value_type(&self) -> bool {
        self.kind == TypeKind::Value
    }

    pub fn bases(&self) -> &[String] {
        &self.bases
    }

    pub fn is_bool(&self) -> bool {
        self.name == BOOL_NAME
    }

    /// The zero/default instance of a value type
    pub fn default_value(&self) -> Option<Value> {
        match self.kind {
            TypeKind::Value => self.default.map(|make| make()),
            TypeKind::Reference => None,
        }
    }

    /// Numeric kind when this is one of the built-in number types
    pub fn number_kind(&self) -> Option<NumberKind> {
        NumberKind::from_name(&self.name)
    }

    /// Whether a value whose runtime type is `source` can be used as `self`
    /// without conversion.
    pub fn is_assignable_from(&self, source: &HostType) -> bool {
        self.name == OBJECT_NAME
            || self.name == source.name
            || source.bases.iter().any(|base| *base == self.name)
    }
}

impl PartialEq for HostType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for HostType {}

impl fmt::Debug for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostType")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("bases", &self.bases)
            .finish()
    }
}

impl fmt::Display for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

pub const BOOL_NAME: &str = "bool";
pub const STRING_NAME: &str = "string";
pub const TABLE_NAME: &str = "table";
pub const ARRAY_NAME: &str = "array";
pub const RESULTS_NAME: &str = "results";
pub const OBJECT_NAME: &str = "object";

static BOOL_TYPE: LazyLock<TypeHandle> =
    LazyLock::new(|| HostType::value(BOOL_NAME, || Value::Bool(false)));
static STRING_TYPE: LazyLock<TypeHandle> = LazyLock::new(|| HostType::reference(STRING_NAME));
static TABLE_TYPE: LazyLock<TypeHandle> = LazyLock::new(|| HostType::reference(TABLE_NAME));
static ARRAY_TYPE: LazyLock<TypeHandle> = LazyLock::new(|| HostType::reference(ARRAY_NAME));
static RESULTS_TYPE: LazyLock<TypeHandle> = LazyLock::new(|| HostType::reference(RESULTS_NAME));
static OBJECT_TYPE: LazyLock<TypeHandle> = LazyLock::new(|| HostType::reference(OBJECT_NAME));

static NUMBER_TYPES: LazyLock<Vec<TypeHandle>> = LazyLock::new(|| {
    NumberKind::ALL
        .into_iter()
        .map(|kind| {
            let default: fn() -> Value = match kind {
                NumberKind::I8 => || Value::Number(NumberKind::I8.zero()),
                NumberKind::I16 => || Value::Number(NumberKind::I16.zero()),
                NumberKind::I32 => || Value::Number(NumberKind::I32.zero()),
                NumberKind::I64 => || Value::Number(NumberKind::I64.zero()),
                NumberKind::U8 => || Value::Number(NumberKind::U8.zero()),
                NumberKind::U16 => || Value::Number(NumberKind::U16.zero()),
                NumberKind::U32 => || Value::Number(NumberKind::U32.zero()),
                NumberKind::U64 => || Value::Number(NumberKind::U64.zero()),
                NumberKind::F32 => || Value::Number(NumberKind::F32.zero()),
                NumberKind::F64 => || Value::Number(NumberKind::F64.zero()),
            };
            HostType::value(kind.name(), default)
        })
        .collect()
});

pub fn bool_type() -> &'static TypeHandle {
    &BOOL_TYPE
}

pub fn string_type() -> &'static TypeHandle {
    &STRING_TYPE
}

pub fn table_type() -> &'static TypeHandle {
    &TABLE_TYPE
}

pub fn array_type() -> &'static TypeHandle {
    &ARRAY_TYPE
}

pub fn results_type() -> &'static TypeHandle {
    &RESULTS_TYPE
}

pub fn object_type() -> &'static TypeHandle {
    &OBJECT_TYPE
}

pub fn number_type(kind: NumberKind) -> &'static TypeHandle {
    let index = NumberKind::ALL
        .iter()
        .position(|k| *k == kind)
        .unwrap_or_default();
    &NUMBER_TYPES[index]
}

/// Every built-in type, in a stable order
pub fn builtin_types() -> impl Iterator<Item = &'static TypeHandle> {
    [bool_type()]
        .into_iter()
        .chain(NUMBER_TYPES.iter())
        .chain([
            string_type(),
            table_type(),
            array_type(),
            results_type(),
            object_type(),
        ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::number::Number;

    #[test]
    fn test_builtin_type_kinds() {
        assert!(bool_type().is_value_type());
        assert!(number_type(NumberKind::U16).is_value_type());
        assert!(!string_type().is_value_type());
        assert_eq!(builtin_types().count(), 16);
    }

    #[test]
    fn test_default_values() {
        assert_eq!(bool_type().default_value(), Some(Value::Bool(false)));
        assert_eq!(
            number_type(NumberKind::F32).default_value(),
            Some(Value::Number(Number::F32(0.0)))
        );
        assert_eq!(table_type().default_value(), None);
    }

    #[test]
    fn test_assignability() {
        let shape = HostType::reference("geometry::Shape");
        let point = HostType::new("geometry::Point", TypeKind::Reference)
            .with_base("geometry::Shape")
            .into_handle();

        assert!(shape.is_assignable_from(&point));
        assert!(!point.is_assignable_from(&shape));
        assert!(object_type().is_assignable_from(&point));
        assert!(object_type().is_assignable_from(bool_type()));
        assert!(!string_type().is_assignable_from(number_type(NumberKind::I64)));
    }
}
