//!
//! Coercion Bridge
//!
//! Converts a dynamic value to the static host type a call site requires.
//! Rules, first match wins:
//!
//! 1. target `bool`: the configured truthiness rule
//! 2. `nil`: the default instance of a value type, `nil` for a reference
//!    type; a value type without a default cannot take `nil`
//! 3. runtime type assignable to the target: the value itself
//! 4. the target's converter, if it converts from the source type
//! 5. the source's converter, if it converts to the target type
//!
//! Anything else is a `RuntimeError::TypeConversion`.
//!

use moonlet_std_core::{TypeHandle, Value};

use super::converter::ConverterCatalog;
use super::truthiness::TruthinessRule;
use crate::error::RuntimeError;

#[derive(Debug, Clone, Default)]
pub struct Coercer {
    rule: TruthinessRule,
    catalog: ConverterCatalog,
}

impl Coercer {
    pub fn new(rule: TruthinessRule, catalog: ConverterCatalog) -> Self {
        Self { rule, catalog }
    }

    pub fn truthiness(&self) -> TruthinessRule {
        self.rule
    }

    pub fn catalog(&self) -> &ConverterCatalog {
        &self.catalog
    }

    pub fn is_truthy(&self, value: &Value) -> bool {
        self.rule.is_truthy(value)
    }

    pub fn convert(&self, value: Value, target: &TypeHandle) -> Result<Value, RuntimeError> {
        if target.is_bool() {
            return Ok(Value::Bool(self.rule.is_truthy(&value)));
        }

        let Some(source) = value.type_handle() else {
            return match target.default_value() {
                Some(default) => Ok(default),
                None if target.is_value_type() => {
                    Err(RuntimeError::type_conversion(&value, target))
                }
                None => Ok(Value::Nil),
            };
        };

        if target.is_assignable_from(&source) {
            return Ok(value);
        }

        if let Some(converter) = self
            .catalog
            .get(target.name())
            .filter(|c| c.can_convert_from(&source))
        {
            return converter.convert_from(&value, target);
        }

        if let Some(converter) = self
            .catalog
            .get(source.name())
            .filter(|c| c.can_convert_to(target))
        {
            return converter.convert_to(&value, target);
        }

        Err(RuntimeError::type_conversion(&value, target))
    }
}
