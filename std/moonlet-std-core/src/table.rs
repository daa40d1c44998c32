//!
//! Script Tables
//!
//! The table data structure belongs to the embedding interpreter; the
//! runtime layer only needs to write and read integer-keyed slots. `Table`
//! is that seam.
//!
//! `ValueTable` is a minimal concrete table (integer and string keys,
//! insertion ordered) and `TableRef` is the shared handle stored inside
//! `Value::Table`. Assigning `Nil` to a slot removes it.
//!

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use indexmap::IndexMap;

use crate::value::Value;

pub trait Table {
    fn set_index(&mut self, index: i64, value: Value);

    fn get_index(&self, index: i64) -> Value;

    /// Number of non-nil entries
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValueTable {
    indexed: IndexMap<i64, Value>,
    named: IndexMap<String, Value>,
}

impl ValueTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_field(&mut self, name: &str, value: Value) {
        if value.is_nil() {
            self.named.shift_remove(name);
        } else {
            self.named.insert(name.to_string(), value);
        }
    }

    pub fn get_field(&self, name: &str) -> Value {
        self.named.get(name).cloned().unwrap_or_default()
    }

    /// Integer-keyed entries in insertion order
    pub fn indexed(&self) -> impl Iterator<Item = (i64, &Value)> {
        self.indexed.iter().map(|(k, v)| (*k, v))
    }
}

impl Table for ValueTable {
    fn set_index(&mut self, index: i64, value: Value) {
        if value.is_nil() {
            self.indexed.shift_remove(&index);
        } else {
            self.indexed.insert(index, value);
        }
    }

    fn get_index(&self, index: i64) -> Value {
        self.indexed.get(&index).cloned().unwrap_or_default()
    }

    fn len(&self) -> usize {
        self.indexed.len() + self.named.len()
    }
}

/// Shared, lockable handle to a `ValueTable`
#[derive(Clone, Default)]
pub struct TableRef(Arc<Mutex<ValueTable>>);

impl TableRef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock(&self) -> MutexGuard<'_, ValueTable> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn ptr_eq(&self, other: &TableRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn as_ptr(&self) -> *const () {
        Arc::as_ptr(&self.0) as *const ()
    }
}

impl Table for TableRef {
    fn set_index(&mut self, index: i64, value: Value) {
        self.lock().set_index(index, value);
    }

    fn get_index(&self, index: i64) -> Value {
        self.lock().get_index(index)
    }

    fn len(&self) -> usize {
        self.lock().len()
    }
}

impl fmt::Debug for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TableRef({:p})", self.as_ptr())
    }
}
