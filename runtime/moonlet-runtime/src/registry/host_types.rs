//!
//! Host Type Resolution
//!
//! Scripts refer to host types by qualified name (`geometry::Point`).
//! Resolution order:
//!
//! 1. the default binding context, i.e. the built-in primitive types
//! 2. the memo of names already resolved through a module scan
//! 3. every registered `HostModule`, in registration order
//!
//! A successful module scan is memoized, so the registry grows one name at
//! a time. Misses are not memoized: a later module registration in a fresh
//! context is the only way a name appears, and a miss is cheap.
//!

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use indexmap::IndexMap;
use tracing::trace;

use moonlet_std_core::{TypeHandle, builtin_types};

/// A named group of host types
pub trait HostModule: Send + Sync {
    fn name(&self) -> &str;

    fn find_type(&self, qualified_name: &str) -> Option<TypeHandle>;
}

/// `HostModule` backed by an explicit list of types
#[derive(Debug, Clone, Default)]
pub struct TypeModule {
    name: String,
    types: IndexMap<String, TypeHandle>,
}

impl TypeModule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            types: IndexMap::new(),
        }
    }

    pub fn with_type(mut self, ty: TypeHandle) -> Self {
        self.types.insert(ty.name().to_string(), ty);
        self
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeHandle> {
        self.types.values()
    }
}

impl HostModule for TypeModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn find_type(&self, qualified_name: &str) -> Option<TypeHandle> {
        self.types.get(qualified_name).cloned()
    }
}

pub struct TypeRegistry {
    defaults: IndexMap<&'static str, TypeHandle>,
    modules: Vec<Arc<dyn HostModule>>,
    memo: RwLock<HashMap<String, TypeHandle>>,
    scans: AtomicUsize,
}

impl TypeRegistry {
    pub fn new(modules: Vec<Arc<dyn HostModule>>) -> Self {
        let defaults = builtin_types()
            .map(|ty| (primitive_name(ty), ty.clone()))
            .collect();
        Self {
            defaults,
            modules,
            memo: RwLock::new(HashMap::new()),
            scans: AtomicUsize::new(0),
        }
    }

    pub fn resolve(&self, name: &str) -> Option<TypeHandle> {
        if let Some(ty) = self.defaults.get(name) {
            return Some(ty.clone());
        }

        if let Some(ty) = self.read_memo(name) {
            return Some(ty);
        }

        let mut memo = self.memo.write().unwrap_or_else(|e| e.into_inner());
        // another thread may have resolved it while we waited
        if let Some(ty) = memo.get(name) {
            return Some(ty.clone());
        }

        self.scans.fetch_add(1, Ordering::Relaxed);
        let (module, ty) = self
            .modules
            .iter()
            .find_map(|module| module.find_type(name).map(|ty| (module.name(), ty)))?;

        trace!(type_name = name, module, "host type memoized");
        memo.insert(name.to_string(), ty.clone());
        Some(ty)
    }

    fn read_memo(&self, name: &str) -> Option<TypeHandle> {
        let memo = self.memo.read().unwrap_or_else(|e| e.into_inner());
        memo.get(name).cloned()
    }

    /// Built-in primitive types, in declaration order
    pub fn defaults(&self) -> impl Iterator<Item = &TypeHandle> {
        self.defaults.values()
    }

    pub fn modules(&self) -> impl Iterator<Item = &dyn HostModule> {
        self.modules.iter().map(|m| m.as_ref())
    }

    /// Number of names resolved through a module scan so far
    pub fn memoized(&self) -> usize {
        self.memo.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Number of module scans run, hits and misses alike
    pub fn scan_count(&self) -> usize {
        self.scans.load(Ordering::Relaxed)
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

fn primitive_name(ty: &'static TypeHandle) -> &'static str {
    ty.name()
}
