//!
//! Truthiness
//!
//! The rule used when a value is coerced to `bool`. The default,
//! `ZeroIsFalse`, is the host-interop rule this runtime has always applied:
//! absent is false, a numeric value is false exactly when it equals zero,
//! and everything else (strings, tables, objects) is true. It differs from
//! the scripting-language convention, where only `nil` and `false` are
//! false; embeddings that want that convention select `NilAndFalse`.
//!

use serde::{Deserialize, Serialize};

use moonlet_std_core::Value;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TruthinessRule {
    /// `nil`, `false` and numeric zero are false
    #[default]
    ZeroIsFalse,
    /// Only `nil` and `false` are false
    NilAndFalse,
}

impl TruthinessRule {
    pub fn is_truthy(self, value: &Value) -> bool {
        match value {
            Value::Nil => false,
            Value::Bool(b) => *b,
            Value::Number(n) => match self {
                TruthinessRule::ZeroIsFalse => !n.is_zero(),
                TruthinessRule::NilAndFalse => true,
            },
            _ => true,
        }
    }
}
