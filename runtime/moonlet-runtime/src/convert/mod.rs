//!
//! Dynamic-to-static coercion: truthiness, the converter catalog and the
//! `Coercer` that applies them in order.
//!

pub mod coerce;
pub mod converter;
pub mod truthiness;

pub use coerce::Coercer;
pub use converter::{ConverterCatalog, NumberConverter, StringConverter, TypeConverter};
pub use truthiness::TruthinessRule;
