//!
//! Result Sequences
//!
//! A `ResultSequence` is the ordered result of a (possibly multi-valued)
//! expression. Most calls return zero to a handful of values, so the
//! sequence stores up to four inline before spilling to the heap.
//!
//! Only the last element may be a nested sequence (`Value::Multi`) standing
//! for an expanded tail call; the runtime's `flatten_results` establishes
//! that invariant.
//!

use std::ops::{Deref, DerefMut};

use smallvec::SmallVec;

use crate::value::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSequence(SmallVec<[Value; 4]>);

impl ResultSequence {
    pub fn new() -> Self {
        Self(SmallVec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(SmallVec::with_capacity(capacity))
    }

    pub fn single(value: Value) -> Self {
        let mut seq = Self::new();
        seq.push(value);
        seq
    }

    pub fn push(&mut self, value: Value) {
        self.0.push(value);
    }

    pub fn pop(&mut self) -> Option<Value> {
        self.0.pop()
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.0.into_vec()
    }
}

impl Deref for ResultSequence {
    type Target = [Value];

    fn deref(&self) -> &[Value] {
        &self.0
    }
}

impl DerefMut for ResultSequence {
    fn deref_mut(&mut self) -> &mut [Value] {
        &mut self.0
    }
}

impl FromIterator<Value> for ResultSequence {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Value> for ResultSequence {
    fn extend<I: IntoIterator<Item = Value>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for ResultSequence {
    type Item = Value;
    type IntoIter = smallvec::IntoIter<[Value; 4]>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSequence {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Vec<Value>> for ResultSequence {
    fn from(values: Vec<Value>) -> Self {
        Self(SmallVec::from_vec(values))
    }
}

/// Build a `ResultSequence` from anything convertible into `Value`.
///
/// ```
/// use moonlet_std_core::{results, Value};
///
/// let seq = results![1, "two", results![3, 4]];
/// assert_eq!(seq.len(), 3);
/// assert!(matches!(seq[2], Value::Multi(_)));
/// ```
#[macro_export]
macro_rules! results {
    () => {
        $crate::ResultSequence::new()
    };
    ($($value:expr),+ $(,)?) => {
        <$crate::ResultSequence as ::std::iter::FromIterator<$crate::Value>>::from_iter([
            $($crate::Value::from($value)),+
        ])
    };
}
