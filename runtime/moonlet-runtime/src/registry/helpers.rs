//!
//! Runtime Helper Table
//!
//! Code generators emit calls to a fixed set of helper operations. Each
//! `Helper` maps to a `HelperDef`: the symbol the generator references
//! (`"rt_"` plus the operation's snake-case name), the invocation shape and
//! a typed function pointer.
//!
//! The table is written as an exhaustive `match`, so a helper without an
//! implementation does not compile. Symbol lookups can still miss when a
//! generator and this runtime disagree; that miss is the fatal
//! `RuntimeError::HelperNotResolved`.
//!

use std::fmt;

use indexmap::IndexMap;

use moonlet_std_core::{ResultSequence, TableRef, TypeHandle, TypedArray, Value};

use super::LazyRegistry;
use crate::concat::string_concat;
use crate::convert::Coercer;
use crate::error::RuntimeError;
use crate::multivalue::{flatten_results, safe_index};
use crate::splice::splice_array;
use crate::spread::spread_into;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Helper {
    /// Read a result slot, `nil` past the end
    SafeIndex,
    /// Coerce a value to a host type
    Convert,
    /// Build the flat result list of a `return`
    FlattenResults,
    /// Join the operands of a `..` chain
    StringConcat,
    /// Store the last entry of a table constructor
    SpreadInto,
    /// Merge fixed arguments with a vararg tail
    Splice,
}

impl Helper {
    pub const ALL: [Helper; 6] = [
        Helper::SafeIndex,
        Helper::Convert,
        Helper::FlattenResults,
        Helper::StringConcat,
        Helper::SpreadInto,
        Helper::Splice,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Helper::SafeIndex => "SafeIndex",
            Helper::Convert => "Convert",
            Helper::FlattenResults => "FlattenResults",
            Helper::StringConcat => "StringConcat",
            Helper::SpreadInto => "SpreadInto",
            Helper::Splice => "Splice",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Helper::SafeIndex => "rt_safe_index",
            Helper::Convert => "rt_convert",
            Helper::FlattenResults => "rt_flatten_results",
            Helper::StringConcat => "rt_string_concat",
            Helper::SpreadInto => "rt_spread_into",
            Helper::Splice => "rt_splice",
        }
    }

    /// The definition backing this helper
    pub fn def(self) -> HelperDef {
        let (params, returns, func): HelperShape = match self {
            Helper::SafeIndex => (
                &["results?", "usize"],
                "value",
                HelperFn::SafeIndex(safe_index),
            ),
            Helper::Convert => (
                &["coercer", "value", "type"],
                "value!",
                HelperFn::Convert(Coercer::convert),
            ),
            Helper::FlattenResults => (
                &["results"],
                "results",
                HelperFn::FlattenResults(flatten_results),
            ),
            Helper::StringConcat => (
                &["string[]"],
                "string",
                HelperFn::StringConcat(string_concat::<String>),
            ),
            Helper::SpreadInto => (
                &["table", "value", "i64"],
                "table",
                HelperFn::SpreadInto(spread_into::<TableRef>),
            ),
            Helper::Splice => (
                &["type", "value[]", "value[]", "usize"],
                "array",
                HelperFn::Splice(splice_array),
            ),
        };

        HelperDef {
            helper: self,
            symbol: self.symbol(),
            params,
            returns,
            func,
        }
    }
}

/// Parameter names, return name and entry point of one helper
type HelperShape = (&'static [&'static str], &'static str, HelperFn);

impl fmt::Display for Helper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Typed entry point of a helper
#[derive(Clone, Copy)]
pub enum HelperFn {
    SafeIndex(fn(Option<&[Value]>, usize) -> Value),
    Convert(fn(&Coercer, Value, &TypeHandle) -> Result<Value, RuntimeError>),
    FlattenResults(fn(ResultSequence) -> ResultSequence),
    StringConcat(fn(&[String]) -> String),
    SpreadInto(fn(&mut TableRef, Value, i64) -> &mut TableRef),
    Splice(fn(&TypeHandle, &[Value], &[Value], usize) -> TypedArray),
}

impl fmt::Debug for HelperFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HelperFn::SafeIndex(_) => "SafeIndex",
            HelperFn::Convert(_) => "Convert",
            HelperFn::FlattenResults(_) => "FlattenResults",
            HelperFn::StringConcat(_) => "StringConcat",
            HelperFn::SpreadInto(_) => "SpreadInto",
            HelperFn::Splice(_) => "Splice",
        };
        write!(f, "HelperFn::{}", name)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct HelperDef {
    pub helper: Helper,
    pub symbol: &'static str,
    /// Parameter shape; `?` marks an optional argument
    pub params: &'static [&'static str],
    /// Result shape; `!` marks a fallible helper
    pub returns: &'static str,
    pub func: HelperFn,
}

impl HelperDef {
    /// One-line signature, e.g. `rt_safe_index(results?, usize) -> value`
    pub fn signature(&self) -> String {
        format!("{}({}) -> {}", self.symbol, self.params.join(", "), self.returns)
    }
}

pub struct HelperRegistry {
    entries: LazyRegistry<Helper, HelperDef>,
}

impl HelperRegistry {
    pub fn new() -> Self {
        Self {
            entries: LazyRegistry::new("helpers"),
        }
    }

    fn entries(&self) -> &IndexMap<Helper, HelperDef> {
        self.entries
            .get_or_scan(|| Helper::ALL.into_iter().map(|h| (h, h.def())).collect())
    }

    pub fn resolve(&self, helper: Helper) -> Result<&HelperDef, RuntimeError> {
        self.entries()
            .get(&helper)
            .ok_or_else(|| RuntimeError::HelperNotResolved {
                symbol: helper.symbol().to_string(),
            })
    }

    /// Resolve a helper by the symbol a code generator emitted
    pub fn resolve_symbol(&self, symbol: &str) -> Result<&HelperDef, RuntimeError> {
        self.entries()
            .values()
            .find(|def| def.symbol == symbol)
            .ok_or_else(|| RuntimeError::HelperNotResolved {
                symbol: symbol.to_string(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &HelperDef> {
        self.entries().values()
    }

    pub fn scan_count(&self) -> usize {
        self.entries.scan_count()
    }
}

impl Default for HelperRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moonlet_std_core::{Table, results, string_type};

    #[test]
    fn test_symbol_convention() {
        for helper in Helper::ALL {
            let def = helper.def();
            assert!(def.symbol.starts_with("rt_"), "{}", def.symbol);
            assert_eq!(def.helper, helper);
        }
    }

    #[test]
    fn test_resolve_every_helper() {
        let registry = HelperRegistry::new();
        for helper in Helper::ALL {
            let def = registry.resolve(helper).expect("helper resolves");
            assert_eq!(def.symbol, helper.symbol());
        }
        assert_eq!(registry.scan_count(), 1);
    }

    #[test]
    fn test_resolve_symbol_miss_is_fatal() {
        let registry = HelperRegistry::new();
        let err = registry.resolve_symbol("rt_table_get").unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("rt_table_get"));
    }

    #[test]
    fn test_helper_fns_are_callable() {
        let registry = HelperRegistry::new();

        let def = registry.resolve(Helper::FlattenResults).expect("helper");
        let HelperFn::FlattenResults(flatten) = def.func else {
            panic!("wrong helper shape");
        };
        assert_eq!(flatten(results![1, results![2, 3]]), results![1, 2, 3]);

        let def = registry.resolve_symbol("rt_spread_into").expect("helper");
        let HelperFn::SpreadInto(spread) = def.func else {
            panic!("wrong helper shape");
        };
        let mut table = TableRef::new();
        spread(&mut table, Value::from(results!["a", "b"]), 1);
        assert_eq!(table.get_index(2), Value::from("b"));

        let def = registry.resolve(Helper::Convert).expect("helper");
        let HelperFn::Convert(convert) = def.func else {
            panic!("wrong helper shape");
        };
        let converted =
            convert(&Coercer::default(), Value::int(5), string_type()).expect("converts");
        assert_eq!(converted, Value::from("5"));
    }

    #[test]
    fn test_signature_listing() {
        let registry = HelperRegistry::new();
        let listing: Vec<String> = registry.iter().map(HelperDef::signature).collect();
        insta::assert_snapshot!(listing[0], @"rt_safe_index(results?, usize) -> value");
        insta::assert_snapshot!(listing[5], @"rt_splice(type, value[], value[], usize) -> array");
    }
}
