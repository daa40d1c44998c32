//!
//! Lazily Populated Registries
//!
//! Every registry of the runtime follows the same lifecycle: it starts
//! empty, the first lookup runs one scan over the registered definitions,
//! and every later lookup is a plain read. Each registry owns its own
//! one-time guard, so a slow scan in one never blocks lookups in another.
//! Concurrent first callers block until the single scan has finished; they
//! never observe a partially populated map.
//!
//! - `helpers`: the compiler-facing helper table
//! - `libraries`: installable libraries by normalized name
//! - `host_types`: qualified host type names, memoized one by one
//! - `builtins`: built-in global functions published by the global scope
//!

pub mod builtins;
pub mod helpers;
pub mod host_types;
pub mod libraries;

use std::hash::Hash;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use indexmap::IndexMap;
use tracing::debug;

pub use builtins::{
    BoundFunction, BuiltinRegistry, CoreFunction, GlobalScope, MethodDef, NativeFn, Signature,
};
pub use helpers::{Helper, HelperDef, HelperFn, HelperRegistry};
pub use host_types::{HostModule, TypeModule, TypeRegistry};
pub use libraries::{Library, LibraryDef, LibraryRegistry};

/// Populate-once map shared by the bulk-scanned registries
pub struct LazyRegistry<K, V> {
    label: &'static str,
    entries: OnceLock<IndexMap<K, V>>,
    scans: AtomicUsize,
}

impl<K: Hash + Eq, V> LazyRegistry<K, V> {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            entries: OnceLock::new(),
            scans: AtomicUsize::new(0),
        }
    }

    /// The populated entries, running `scan` if this is the first use
    pub fn get_or_scan(&self, scan: impl FnOnce() -> IndexMap<K, V>) -> &IndexMap<K, V> {
        self.entries.get_or_init(|| {
            self.scans.fetch_add(1, Ordering::Relaxed);
            debug!(registry = self.label, "scanning registry");
            let entries = scan();
            debug!(registry = self.label, entries = entries.len(), "registry populated");
            entries
        })
    }

    pub fn is_populated(&self) -> bool {
        self.entries.get().is_some()
    }

    /// Number of scans run so far; at most one
    pub fn scan_count(&self) -> usize {
        self.scans.load(Ordering::Relaxed)
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}

/// Strip `prefix` from `declared` (ASCII case-insensitive) and lower-case
/// the remainder. `None` when the prefix is missing or nothing remains.
pub(crate) fn strip_prefix_normalized(declared: &str, prefix: &str) -> Option<String> {
    let head = declared.get(..prefix.len())?;
    if !head.eq_ignore_ascii_case(prefix) {
        return None;
    }
    let rest = &declared[prefix.len()..];
    (!rest.is_empty()).then(|| rest.to_lowercase())
}
