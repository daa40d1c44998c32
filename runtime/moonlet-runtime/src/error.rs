///
/// Runtime error types.
///
/// Only two operations of the runtime layer can fail: coercion (no
/// conversion path) and symbol-based helper resolution (a code generator
/// asked for a helper this runtime does not provide). Lookups that may
/// legitimately miss return `Option` instead.
///

use miette::Diagnostic;
use thiserror::Error;

use moonlet_std_core::{HostType, Value};

#[derive(Debug, Error, Diagnostic)]
pub enum RuntimeError {
    #[error("'{value}' cannot be converted to '{target}'")]
    #[diagnostic(
        code(moonlet::runtime::type_conversion),
        help("no converter for the source or the target type accepts this pair")
    )]
    TypeConversion { value: String, target: String },

    #[error("runtime helper '{symbol}' not resolved")]
    #[diagnostic(
        code(moonlet::runtime::helper_not_resolved),
        help("code generator and runtime disagree on the helper table; this is a build defect")
    )]
    HelperNotResolved { symbol: String },

    #[error("builtin '{name}' failed: {message}")]
    #[diagnostic(code(moonlet::runtime::builtin))]
    Builtin { name: String, message: String },
}

impl RuntimeError {
    pub fn type_conversion(value: &Value, target: &HostType) -> Self {
        RuntimeError::TypeConversion {
            value: value.to_string(),
            target: target.name().to_string(),
        }
    }

    pub fn builtin(name: impl Into<String>, message: impl Into<String>) -> Self {
        RuntimeError::Builtin {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Whether the error signals a defect in the runtime/compiler contract
    /// rather than a script-level fault.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RuntimeError::HelperNotResolved { .. })
    }
}
