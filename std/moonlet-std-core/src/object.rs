//!
//! Host Objects
//!
//! Opaque host data travelling through script code. The object carries its
//! own `TypeHandle` so coercion can test assignability without knowing the
//! concrete Rust type.
//!

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::types::TypeHandle;

#[derive(Clone)]
pub struct HostObject {
    ty: TypeHandle,
    data: Arc<dyn Any + Send + Sync>,
}

impl HostObject {
    pub fn new<T: Any + Send + Sync>(ty: TypeHandle, data: T) -> Self {
        Self {
            ty,
            data: Arc::new(data),
        }
    }

    pub fn type_handle(&self) -> &TypeHandle {
        &self.ty
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.data.downcast_ref::<T>()
    }

    pub fn ptr_eq(&self, other: &HostObject) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    pub fn as_ptr(&self) -> *const () {
        Arc::as_ptr(&self.data) as *const ()
    }
}

impl fmt::Debug for HostObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostObject({}, {:p})", self.ty.name(), self.as_ptr())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HostType;

    #[derive(Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[test]
    fn test_downcast() {
        let ty = HostType::reference("geometry::Point");
        let obj = HostObject::new(ty, Point { x: 1, y: 2 });
        assert_eq!(obj.downcast_ref::<Point>(), Some(&Point { x: 1, y: 2 }));
        assert!(obj.downcast_ref::<String>().is_none());
        assert_eq!(obj.type_handle().name(), "geometry::Point");
    }

    #[test]
    fn test_clone_is_same_object() {
        let obj = HostObject::new(HostType::reference("x"), 5u8);
        assert!(obj.ptr_eq(&obj.clone()));
        assert!(!obj.ptr_eq(&HostObject::new(HostType::reference("x"), 5u8)));
    }
}
