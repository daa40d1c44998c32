//!
//! Typed Host Arrays
//!
//! A `TypedArray` is a fixed-length, homogeneous array as the host sees it:
//! every element is declared to be of `element_type`. Elements are stored as
//! `Value`s and shared through an `Arc<[Value]>`, so cloning the array never
//! copies its contents.
//!

use std::sync::Arc;

use crate::types::TypeHandle;
use crate::value::Value;

#[derive(Debug, Clone)]
pub struct TypedArray {
    element_type: TypeHandle,
    items: Arc<[Value]>,
}

impl TypedArray {
    pub fn new(element_type: TypeHandle, items: impl Into<Arc<[Value]>>) -> Self {
        Self {
            element_type,
            items: items.into(),
        }
    }

    pub fn empty(element_type: TypeHandle) -> Self {
        Self::new(element_type, Vec::new())
    }

    pub fn element_type(&self) -> &TypeHandle {
        &self.element_type
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn ptr_eq(&self, other: &TypedArray) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }
}

impl PartialEq for TypedArray {
    fn eq(&self, other: &Self) -> bool {
        self.element_type == other.element_type && self.items == other.items
    }
}
