//!
//! Demonstration registrations
//!
//! A small surface for the registries to discover: two library stubs, a
//! global scope with a handful of built-ins and a `geometry` host module.
//! The library stubs list member names only.
//!

use std::any::Any;
use std::sync::Arc;

use moonlet_runtime::{
    GlobalScope, HostModule, Library, LibraryDef, MethodDef, RuntimeBuilder, RuntimeError,
    TypeModule,
};
use moonlet_std_core::{HostType, ResultSequence, TypeHandle, Value, results};

pub const POINT_TYPE: &str = "geometry::Point";

struct StubLibrary {
    members: &'static [&'static str],
}

impl Library for StubLibrary {
    fn member_names(&self) -> Vec<&str> {
        self.members.to_vec()
    }
}

fn string_library() -> Arc<dyn Library> {
    Arc::new(StubLibrary {
        members: &["byte", "format", "len", "lower", "rep", "sub", "upper"],
    })
}

fn math_library() -> Arc<dyn Library> {
    Arc::new(StubLibrary {
        members: &["abs", "ceil", "floor", "max", "min", "sqrt"],
    })
}

pub const LIBRARIES: &[LibraryDef] = &[
    LibraryDef::new("LibraryString", string_library),
    LibraryDef::new("LibraryMath", math_library),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

pub fn point_type() -> TypeHandle {
    HostType::reference(POINT_TYPE)
}

pub fn geometry_module() -> Arc<dyn HostModule> {
    Arc::new(TypeModule::new("geometry").with_type(point_type()))
}

pub struct DemoScope {
    methods: Vec<MethodDef>,
}

impl DemoScope {
    pub fn new() -> Self {
        Self {
            methods: vec![
                MethodDef::new("lua_Print", &["object"], "results", lua_print),
                MethodDef::new("lua_Type", &["object"], "string", lua_type),
                MethodDef::new("lua_ToString", &["object"], "string", lua_tostring),
                MethodDef::new("lua_Distance", &[POINT_TYPE, POINT_TYPE], "f64", lua_distance),
                MethodDef::new("dump_state", &[], "results", dump_state),
            ],
        }
    }
}

impl GlobalScope for DemoScope {
    fn methods(&self) -> &[MethodDef] {
        &self.methods
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn lua_print(_scope: &dyn GlobalScope, args: &[Value]) -> Result<ResultSequence, RuntimeError> {
    println!("{}", args[0]);
    Ok(ResultSequence::new())
}

fn lua_type(_scope: &dyn GlobalScope, args: &[Value]) -> Result<ResultSequence, RuntimeError> {
    Ok(results![args[0].type_name()])
}

fn lua_tostring(_scope: &dyn GlobalScope, args: &[Value]) -> Result<ResultSequence, RuntimeError> {
    Ok(results![args[0].to_string()])
}

fn lua_distance(_scope: &dyn GlobalScope, args: &[Value]) -> Result<ResultSequence, RuntimeError> {
    let point_at = |index: usize| match &args[index] {
        Value::Object(obj) => obj.downcast_ref::<Point>().copied(),
        _ => None,
    };
    let (Some(a), Some(b)) = (point_at(0), point_at(1)) else {
        return Err(RuntimeError::builtin("distance", "expected two points"));
    };
    Ok(results![(a.x - b.x).hypot(a.y - b.y)])
}

fn dump_state(scope: &dyn GlobalScope, _args: &[Value]) -> Result<ResultSequence, RuntimeError> {
    Ok(results![scope.methods().len() as i64])
}

/// A builder carrying every demonstration registration
pub fn builder() -> RuntimeBuilder {
    LIBRARIES
        .iter()
        .fold(RuntimeBuilder::new(), |builder, def| builder.library(*def))
        .host_module(geometry_module())
        .global_scope(Arc::new(DemoScope::new()))
}
