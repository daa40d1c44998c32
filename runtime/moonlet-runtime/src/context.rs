//!
//! Runtime Context
//!
//! A `RuntimeContext` owns everything one interpreter instance needs at
//! execution time: the configuration, the coercer with its converter
//! catalog, and the four registries. Contexts are independent of each
//! other; two interpreters in one process never share registry state.
//!
//! Build one with `RuntimeBuilder`, hand it out by reference (or `Arc`),
//! and every registry populates itself on first use.
//!
//! ```
//! use std::sync::Arc;
//! use moonlet_runtime::{RuntimeBuilder, TypeModule};
//! use moonlet_std_core::HostType;
//!
//! let ctx = RuntimeBuilder::new()
//!     .host_module(Arc::new(
//!         TypeModule::new("geometry").with_type(HostType::reference("geometry::Point")),
//!     ))
//!     .build()
//!     .unwrap();
//!
//! assert!(ctx.host_type("geometry::Point").is_some());
//! assert!(ctx.library("string").is_none());
//! ```
//!

use std::sync::Arc;

use tracing::debug;

use moonlet_std_core::{ResultSequence, TypeHandle, Value};

use crate::config::{ConfigError, RuntimeConfig};
use crate::convert::{Coercer, ConverterCatalog, TypeConverter};
use crate::error::RuntimeError;
use crate::registry::{
    BoundFunction, BuiltinRegistry, CoreFunction, GlobalScope, Helper, HelperDef, HelperRegistry,
    HostModule, Library, LibraryDef, LibraryRegistry, TypeRegistry,
};

pub struct RuntimeContext {
    config: RuntimeConfig,
    coercer: Coercer,
    helpers: HelperRegistry,
    libraries: LibraryRegistry,
    types: Arc<TypeRegistry>,
    builtins: BuiltinRegistry,
}

impl RuntimeContext {
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn coercer(&self) -> &Coercer {
        &self.coercer
    }

    pub fn convert(&self, value: Value, target: &TypeHandle) -> Result<Value, RuntimeError> {
        self.coercer.convert(value, target)
    }

    pub fn is_truthy(&self, value: &Value) -> bool {
        self.coercer.is_truthy(value)
    }

    pub fn helpers(&self) -> &HelperRegistry {
        &self.helpers
    }

    pub fn resolve_helper(&self, helper: Helper) -> Result<&HelperDef, RuntimeError> {
        self.helpers.resolve(helper)
    }

    pub fn resolve_helper_symbol(&self, symbol: &str) -> Result<&HelperDef, RuntimeError> {
        self.helpers.resolve_symbol(symbol)
    }

    pub fn libraries(&self) -> &LibraryRegistry {
        &self.libraries
    }

    pub fn library(&self, name: &str) -> Option<Arc<dyn Library>> {
        self.libraries.get(name)
    }

    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    pub fn host_type(&self, name: &str) -> Option<TypeHandle> {
        self.types.resolve(name)
    }

    pub fn builtins(&self) -> &BuiltinRegistry {
        &self.builtins
    }

    pub fn builtin(&self, name: &str) -> Option<&CoreFunction> {
        self.builtins.get(name)
    }

    pub fn bind_builtin(&self, name: &str) -> Option<BoundFunction> {
        self.builtins.bind(name)
    }

    /// Look up, bind and call a built-in in one step
    pub fn call_builtin(
        &self,
        name: &str,
        args: &[Value],
    ) -> Option<Result<ResultSequence, RuntimeError>> {
        let function = self.bind_builtin(name)?;
        Some(function.call(&self.coercer, args))
    }
}

#[derive(Default)]
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    converters: Vec<Arc<dyn TypeConverter>>,
    libraries: Vec<LibraryDef>,
    modules: Vec<Arc<dyn HostModule>>,
    scope: Option<Arc<dyn GlobalScope>>,
}

impl RuntimeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Register a converter; it replaces a built-in one for the same type
    pub fn converter(mut self, converter: Arc<dyn TypeConverter>) -> Self {
        self.converters.push(converter);
        self
    }

    pub fn library(mut self, def: LibraryDef) -> Self {
        self.libraries.push(def);
        self
    }

    pub fn host_module(mut self, module: Arc<dyn HostModule>) -> Self {
        self.modules.push(module);
        self
    }

    pub fn global_scope(mut self, scope: Arc<dyn GlobalScope>) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn build(self) -> Result<RuntimeContext, ConfigError> {
        self.config.validate()?;

        let mut catalog = ConverterCatalog::with_builtins();
        for converter in self.converters {
            catalog.register(converter);
        }

        debug!(
            converters = catalog.len(),
            libraries = self.libraries.len(),
            modules = self.modules.len(),
            global_scope = self.scope.is_some(),
            "runtime context built"
        );

        let types = Arc::new(TypeRegistry::new(self.modules));
        Ok(RuntimeContext {
            coercer: Coercer::new(self.config.truthiness, catalog),
            helpers: HelperRegistry::new(),
            libraries: LibraryRegistry::new(self.config.library_prefix.clone(), self.libraries),
            builtins: BuiltinRegistry::new(
                self.config.builtin_prefix.clone(),
                self.scope,
                Arc::clone(&types),
            ),
            types,
            config: self.config,
        })
    }
}
