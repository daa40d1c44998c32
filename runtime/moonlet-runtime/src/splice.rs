//!
//! Array Splicing
//!
//! Re-merges fixed leading arguments with a variadic tail taken from an
//! offset into another array, e.g. `f(a, b, ...)` after `...` was captured
//! from a longer argument list. Pure reshaping: elements are cloned, never
//! converted.
//!

use moonlet_std_core::{TypeHandle, TypedArray, Value};

/// Build `prefix ++ suffix[suffix_start..]` as a new array.
///
/// `suffix_start` must lie in `0..=suffix.len()`; an offset past the end is
/// clamped, which contributes no suffix elements.
pub fn splice<T: Clone>(prefix: &[T], suffix: &[T], suffix_start: usize) -> Vec<T> {
    let tail = &suffix[suffix_start.min(suffix.len())..];

    let mut spliced = Vec::with_capacity(prefix.len() + tail.len());
    spliced.extend_from_slice(prefix);
    spliced.extend_from_slice(tail);
    spliced
}

/// `splice` for dynamically typed host arrays of `element_type`
pub fn splice_array(
    element_type: &TypeHandle,
    prefix: &[Value],
    suffix: &[Value],
    suffix_start: usize,
) -> TypedArray {
    TypedArray::new(element_type.clone(), splice(prefix, suffix, suffix_start))
}
