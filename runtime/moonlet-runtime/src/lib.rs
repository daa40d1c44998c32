///
/// moonlet Runtime Support Layer
///
/// The primitive operations that compiled script code calls at execution
/// time, plus the per-interpreter registries it resolves names against.
///
/// Contains:
/// - Multi-value protocol (flatten_results, safe_index, first_value)
/// - Vararg splicing (splice, splice_array)
/// - Table-constructor spreading (spread_into)
/// - String concatenation for `..` chains (string_concat)
/// - Dynamic-to-static coercion (Coercer, ConverterCatalog, TruthinessRule)
/// - Lazily populated registries for helpers, libraries, host types and
///   built-in global functions, owned by a RuntimeContext
///

pub mod concat;
pub mod config;
pub mod context;
pub mod convert;
pub mod error;
pub mod multivalue;
pub mod registry;
pub mod splice;
pub mod spread;

pub use concat::string_concat;
pub use config::{ConfigError, RuntimeConfig};
pub use context::{RuntimeBuilder, RuntimeContext};
pub use convert::{
    Coercer, ConverterCatalog, NumberConverter, StringConverter, TruthinessRule, TypeConverter,
};
pub use error::RuntimeError;
pub use multivalue::{first_value, flatten_results, safe_index};
pub use registry::{
    BoundFunction, BuiltinRegistry, CoreFunction, GlobalScope, Helper, HelperDef, HelperFn,
    HelperRegistry, HostModule, Library, LibraryDef, LibraryRegistry, MethodDef, NativeFn,
    Signature, TypeModule, TypeRegistry,
};
pub use splice::{splice, splice_array};
pub use spread::spread_into;
