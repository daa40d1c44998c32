//!
//! Built-in Global Functions
//!
//! The global scope publishes its built-ins as a method table. A method is
//! a built-in when its declared name carries the configured prefix (`lua_`
//! by default, any case); the script-visible name is the remainder,
//! lower-cased, so `lua_ToString` is published as `tostring`.
//!
//! Declared parameter and return types are resolved through the host type
//! registry during the scan. A method naming a type nobody knows is skipped
//! with a warning rather than failing the whole registry.
//!
//! A `CoreFunction` is inert metadata; `bind` pairs it with a scope to get a
//! callable that reads its arguments with `safe_index` and coerces each one
//! to the declared parameter type before the call.
//!

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::{trace, warn};

use moonlet_std_core::{ResultSequence, TypeHandle, Value};

use super::host_types::TypeRegistry;
use super::{LazyRegistry, strip_prefix_normalized};
use crate::convert::Coercer;
use crate::error::RuntimeError;
use crate::multivalue::{first_value, safe_index};

/// Native entry point of a global-scope method. Arguments arrive already
/// coerced to the declared parameter types.
pub type NativeFn = fn(&dyn GlobalScope, &[Value]) -> Result<ResultSequence, RuntimeError>;

/// One entry of a global scope's method table
#[derive(Clone, Copy)]
pub struct MethodDef {
    pub name: &'static str,
    /// Qualified type names of the parameters
    pub params: &'static [&'static str],
    pub returns: &'static str,
    pub func: NativeFn,
}

impl MethodDef {
    pub const fn new(
        name: &'static str,
        params: &'static [&'static str],
        returns: &'static str,
        func: NativeFn,
    ) -> Self {
        Self {
            name,
            params,
            returns,
            func,
        }
    }
}

impl fmt::Debug for MethodDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDef")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("returns", &self.returns)
            .finish_non_exhaustive()
    }
}

/// The object whose methods are published as built-in functions
pub trait GlobalScope: Send + Sync {
    fn methods(&self) -> &[MethodDef];

    fn as_any(&self) -> &dyn Any;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub params: Vec<TypeHandle>,
    pub returns: TypeHandle,
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", param.name())?;
        }
        write!(f, ") -> {}", self.returns.name())
    }
}

#[derive(Debug, Clone)]
pub struct CoreFunction {
    pub name: String,
    pub method: MethodDef,
    pub signature: Signature,
}

impl CoreFunction {
    pub fn bind(&self, scope: Arc<dyn GlobalScope>) -> BoundFunction {
        BoundFunction {
            name: self.name.clone(),
            func: self.method.func,
            signature: self.signature.clone(),
            scope,
        }
    }
}

/// A built-in paired with the scope it runs against
#[derive(Clone)]
pub struct BoundFunction {
    name: String,
    func: NativeFn,
    signature: Signature,
    scope: Arc<dyn GlobalScope>,
}

impl BoundFunction {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Call with script arguments. Missing arguments read as `nil` and
    /// extra ones are ignored; every argument is coerced to its parameter
    /// type first.
    pub fn call(&self, coercer: &Coercer, args: &[Value]) -> Result<ResultSequence, RuntimeError> {
        let mut coerced = Vec::with_capacity(self.signature.params.len());
        for (index, param) in self.signature.params.iter().enumerate() {
            let arg = first_value(safe_index(Some(args), index));
            coerced.push(coercer.convert(arg, param)?);
        }
        (self.func)(self.scope.as_ref(), &coerced)
    }
}

impl fmt::Debug for BoundFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundFunction")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

pub struct BuiltinRegistry {
    prefix: String,
    scope: Option<Arc<dyn GlobalScope>>,
    types: Arc<TypeRegistry>,
    entries: LazyRegistry<String, CoreFunction>,
}

impl BuiltinRegistry {
    pub fn new(
        prefix: impl Into<String>,
        scope: Option<Arc<dyn GlobalScope>>,
        types: Arc<TypeRegistry>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            scope,
            types,
            entries: LazyRegistry::new("builtins"),
        }
    }

    fn entries(&self) -> &IndexMap<String, CoreFunction> {
        self.entries.get_or_scan(|| self.scan())
    }

    fn scan(&self) -> IndexMap<String, CoreFunction> {
        let mut found = IndexMap::new();
        let Some(scope) = &self.scope else {
            return found;
        };

        for method in scope.methods() {
            let Some(name) = strip_prefix_normalized(method.name, &self.prefix) else {
                trace!(method = method.name, "not a builtin");
                continue;
            };
            let Some(signature) = self.signature_of(method) else {
                continue;
            };
            match found.entry(name) {
                Entry::Occupied(existing) => {
                    warn!(
                        method = method.name,
                        builtin = %existing.key(),
                        "duplicate builtin name, keeping the first method"
                    );
                }
                Entry::Vacant(slot) => {
                    let name = slot.key().clone();
                    slot.insert(CoreFunction {
                        name,
                        method: *method,
                        signature,
                    });
                }
            }
        }
        found
    }

    fn signature_of(&self, method: &MethodDef) -> Option<Signature> {
        let resolve = |type_name: &str| {
            let ty = self.types.resolve(type_name);
            if ty.is_none() {
                warn!(
                    method = method.name,
                    type_name, "builtin signature names an unknown type, skipped"
                );
            }
            ty
        };

        let params = method
            .params
            .iter()
            .map(|&p| resolve(p))
            .collect::<Option<Vec<_>>>()?;
        let returns = resolve(method.returns)?;
        Some(Signature { params, returns })
    }

    /// The built-in published as `name`, matched exactly against the
    /// lower-case keys
    pub fn get(&self, name: &str) -> Option<&CoreFunction> {
        self.entries().get(name)
    }

    /// Look up `name` and bind it to this registry's global scope
    pub fn bind(&self, name: &str) -> Option<BoundFunction> {
        let scope = self.scope.clone()?;
        self.get(name).map(|function| function.bind(scope))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CoreFunction> {
        self.entries().values()
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn scan_count(&self) -> usize {
        self.entries.scan_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moonlet_std_core::{HostType, Number, results};

    use crate::registry::host_types::{HostModule, TypeModule};

    struct TestScope {
        methods: Vec<MethodDef>,
    }

    impl GlobalScope for TestScope {
        fn methods(&self) -> &[MethodDef] {
            &self.methods
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn lua_add(_scope: &dyn GlobalScope, args: &[Value]) -> Result<ResultSequence, RuntimeError> {
        match args {
            [Value::Number(Number::I32(a)), Value::Number(Number::I32(b))] => {
                Ok(results![Value::Number(Number::I32(a + b))])
            }
            _ => Err(RuntimeError::builtin("add", "expected two i32 arguments")),
        }
    }

    fn lua_describe(
        scope: &dyn GlobalScope,
        args: &[Value],
    ) -> Result<ResultSequence, RuntimeError> {
        let count = scope
            .as_any()
            .downcast_ref::<TestScope>()
            .map(|s| s.methods.len())
            .unwrap_or_default();
        Ok(results![format!("{} of {}", args[0], count)])
    }

    fn noop(_scope: &dyn GlobalScope, _args: &[Value]) -> Result<ResultSequence, RuntimeError> {
        Ok(ResultSequence::new())
    }

    fn scope() -> Arc<dyn GlobalScope> {
        Arc::new(TestScope {
            methods: vec![
                MethodDef::new("lua_Add", &["i32", "i32"], "i32", lua_add),
                MethodDef::new("LUA_describe", &["string"], "string", lua_describe),
                MethodDef::new("lua_Move", &["geometry::Point"], "results", noop),
                MethodDef::new("lua_Warp", &["geometry::Portal"], "results", noop),
                MethodDef::new("format_args", &[], "string", noop),
                MethodDef::new("lua_add", &[], "results", noop),
            ],
        })
    }

    fn registry() -> BuiltinRegistry {
        let geometry: Arc<dyn HostModule> = Arc::new(
            TypeModule::new("geometry").with_type(HostType::reference("geometry::Point")),
        );
        let types = TypeRegistry::new(vec![geometry]);
        BuiltinRegistry::new("lua_", Some(scope()), Arc::new(types))
    }

    #[test]
    fn test_discovery_by_prefix() {
        let registry = registry();
        let names: Vec<&str> = registry.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["add", "describe", "move"]);
        assert_eq!(registry.scan_count(), 1);
    }

    #[test]
    fn test_signature_resolved_through_types() {
        let registry = registry();
        let add = registry.get("add").expect("add builtin");
        assert_eq!(add.signature.to_string(), "(i32, i32) -> i32");
        assert_eq!(add.method.name, "lua_Add");

        let moved = registry.get("move").expect("move builtin");
        assert_eq!(moved.signature.params[0].name(), "geometry::Point");
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let registry = registry();
        assert!(registry.get("add").is_some());
        assert!(registry.get("ADD").is_none());
        assert!(registry.get("Describe").is_none());
        assert!(registry.bind("Add").is_none());
    }

    #[test]
    fn test_unknown_type_skips_method() {
        let registry = registry();
        assert!(registry.get("warp").is_none());
        assert!(registry.get("format_args").is_none());
    }

    #[test]
    fn test_bound_call_coerces_arguments() {
        let registry = registry();
        let add = registry.bind("add").expect("bound");
        let coercer = Coercer::default();

        let out = add
            .call(&coercer, &[Value::from("2"), Value::int(40)])
            .expect("call succeeds");
        assert_eq!(out, results![Value::Number(Number::I32(42))]);

        let out = add.call(&coercer, &[Value::int(5)]).expect("missing reads nil");
        assert_eq!(out, results![Value::Number(Number::I32(5))]);

        let out = add
            .call(&coercer, &[Value::int(1), Value::int(2), Value::int(99)])
            .expect("extra ignored");
        assert_eq!(out, results![Value::Number(Number::I32(3))]);
    }

    #[test]
    fn test_bound_call_propagates_errors() {
        let registry = registry();
        let add = registry.bind("add").expect("bound");
        let err = add
            .call(&Coercer::default(), &[Value::from("two")])
            .unwrap_err();
        assert!(matches!(err, RuntimeError::TypeConversion { .. }));
    }

    #[test]
    fn test_scope_reachable_from_native() {
        let registry = registry();
        let describe = registry.bind("describe").expect("bound");
        let out = describe
            .call(&Coercer::default(), &[Value::from(results![7, 8])])
            .expect("call succeeds");
        assert_eq!(out, results!["7 of 6"]);
    }

    #[test]
    fn test_no_scope_means_no_builtins() {
        let registry = BuiltinRegistry::new("lua_", None, Arc::new(TypeRegistry::default()));
        assert!(registry.get("print").is_none());
        assert!(registry.bind("print").is_none());
        assert_eq!(registry.scan_count(), 1);
    }
}
