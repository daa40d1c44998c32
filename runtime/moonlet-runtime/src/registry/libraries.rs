//!
//! Library Registry
//!
//! Libraries (`string`, `math`, ...) are provided by the embedder as
//! `LibraryDef`s. A definition is a provider only when its declared name
//! carries the configured prefix (`Library` by default, any case); the
//! script-visible key is the remainder, lower-cased, so `LibraryString`
//! installs as `string`.
//!
//! Each provider is instantiated once, during the registry's single scan,
//! and the instance is shared for the lifetime of the owning context.
//!

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::warn;

use moonlet_std_core::Value;

use super::{LazyRegistry, strip_prefix_normalized};

/// A dynamic capability object installed under a library name
pub trait Library: Send + Sync {
    /// Names of the members this library exposes, in a stable order
    fn member_names(&self) -> Vec<&str>;

    fn member(&self, _name: &str) -> Option<Value> {
        None
    }
}

/// Registration of one library provider
#[derive(Clone, Copy)]
pub struct LibraryDef {
    pub declared_name: &'static str,
    pub create: fn() -> Arc<dyn Library>,
}

impl LibraryDef {
    pub const fn new(declared_name: &'static str, create: fn() -> Arc<dyn Library>) -> Self {
        Self {
            declared_name,
            create,
        }
    }
}

impl fmt::Debug for LibraryDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibraryDef")
            .field("declared_name", &self.declared_name)
            .finish_non_exhaustive()
    }
}

pub struct LibraryRegistry {
    prefix: String,
    defs: Vec<LibraryDef>,
    entries: LazyRegistry<String, Arc<dyn Library>>,
}

impl LibraryRegistry {
    pub fn new(prefix: impl Into<String>, defs: Vec<LibraryDef>) -> Self {
        Self {
            prefix: prefix.into(),
            defs,
            entries: LazyRegistry::new("libraries"),
        }
    }

    fn entries(&self) -> &IndexMap<String, Arc<dyn Library>> {
        self.entries.get_or_scan(|| self.scan())
    }

    fn scan(&self) -> IndexMap<String, Arc<dyn Library>> {
        let mut found = IndexMap::new();
        for def in &self.defs {
            let Some(key) = strip_prefix_normalized(def.declared_name, &self.prefix) else {
                warn!(
                    declared = def.declared_name,
                    prefix = %self.prefix,
                    "library declaration lacks the provider prefix, skipped"
                );
                continue;
            };
            match found.entry(key) {
                Entry::Occupied(existing) => {
                    warn!(
                        declared = def.declared_name,
                        key = %existing.key(),
                        "duplicate library key, keeping the first provider"
                    );
                }
                Entry::Vacant(slot) => {
                    slot.insert((def.create)());
                }
            }
        }
        found
    }

    /// The library installed under `name`. Keys are lower-case and script
    /// names are case-sensitive, so `MATH` does not find `math`.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Library>> {
        self.entries().get(name).cloned()
    }

    /// Installed library keys in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries().keys().map(String::as_str)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn scan_count(&self) -> usize {
        self.entries.scan_count()
    }
}
