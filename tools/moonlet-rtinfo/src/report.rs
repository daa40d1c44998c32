//!
//! Output rows. Each row prints as one text line, or as a JSON object
//! with `--json`.
//!

use std::fmt;

use miette::IntoDiagnostic;
use serde::Serialize;

use moonlet_runtime::{CoreFunction, HelperDef, Library};
use moonlet_std_core::{HostType, TypeKind, Value};

pub fn emit<T: Serialize + fmt::Display>(rows: &[T], json: bool) -> miette::Result<()> {
    if json {
        let text = serde_json::to_string_pretty(rows).into_diagnostic()?;
        println!("{}", text);
    } else {
        for row in rows {
            println!("{}", row);
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct HelperRow {
    pub symbol: String,
    pub helper: String,
    pub params: Vec<String>,
    pub returns: String,
}

impl From<&HelperDef> for HelperRow {
    fn from(def: &HelperDef) -> Self {
        Self {
            symbol: def.symbol.to_string(),
            helper: def.helper.name().to_string(),
            params: def.params.iter().map(|p| p.to_string()).collect(),
            returns: def.returns.to_string(),
        }
    }
}

impl fmt::Display for HelperRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}) -> {}", self.symbol, self.params.join(", "), self.returns)
    }
}

#[derive(Debug, Serialize)]
pub struct LibraryRow {
    pub name: String,
    pub members: Vec<String>,
}

impl LibraryRow {
    pub fn new(name: &str, library: &dyn Library) -> Self {
        Self {
            name: name.to_string(),
            members: library.member_names().into_iter().map(str::to_string).collect(),
        }
    }
}

impl fmt::Display for LibraryRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.members.join(", "))
    }
}

#[derive(Debug, Serialize)]
pub struct BuiltinRow {
    pub name: String,
    pub method: String,
    pub params: Vec<String>,
    pub returns: String,
}

impl From<&CoreFunction> for BuiltinRow {
    fn from(function: &CoreFunction) -> Self {
        Self {
            name: function.name.clone(),
            method: function.method.name.to_string(),
            params: function
                .signature
                .params
                .iter()
                .map(|ty| ty.name().to_string())
                .collect(),
            returns: function.signature.returns.name().to_string(),
        }
    }
}

impl fmt::Display for BuiltinRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}) -> {}  [{}]",
            self.name,
            self.params.join(", "),
            self.returns,
            self.method
        )
    }
}

#[derive(Debug, Serialize)]
pub struct TypeRow {
    pub name: String,
    pub kind: &'static str,
    pub bases: Vec<String>,
    pub default: Option<String>,
    pub builtin: bool,
}

impl TypeRow {
    pub fn new(ty: &HostType, builtin: bool) -> Self {
        Self {
            name: ty.name().to_string(),
            kind: match ty.kind() {
                TypeKind::Value => "value",
                TypeKind::Reference => "reference",
            },
            bases: ty.bases().to_vec(),
            default: ty.default_value().map(|v| v.to_string()),
            builtin,
        }
    }
}

impl fmt::Display for TypeRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let origin = if self.builtin { "builtin" } else { "host module" };
        write!(f, "{} ({}, {})", self.name, self.kind, origin)?;
        if let Some(default) = &self.default {
            write!(f, " default {}", default)?;
        }
        if !self.bases.is_empty() {
            write!(f, " : {}", self.bases.join(", "))?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct ConversionRow {
    pub input: String,
    pub target: String,
    pub value: String,
    pub value_type: String,
}

impl ConversionRow {
    pub fn new(input: &str, target: &HostType, value: &Value) -> Self {
        Self {
            input: input.to_string(),
            target: target.name().to_string(),
            value: value.to_string(),
            value_type: value.type_name().to_string(),
        }
    }
}

impl fmt::Display for ConversionRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} as {} = {} ({})",
            self.input, self.target, self.value, self.value_type
        )
    }
}
