//!
//! Multi-Value Protocol
//!
//! Script expressions may yield several values, but only the last slot of a
//! result list expands: `return a(), b()` keeps the first value of `a()`
//! and every value of `b()`. Compiled code hands the raw shape to
//! `flatten_results`, which produces the flat sequence.
//!
//! `safe_index` is the reading side: it is the only accessor allowed past a
//! sequence's end, so excess formal parameters read `Nil`.
//!
//! Neither function fails or logs; both sit on every call site.
//!

use moonlet_std_core::{ResultSequence, Value};

/// Collapse a value to its first result; non-sequences pass through
pub fn first_value(value: Value) -> Value {
    match value {
        Value::Multi(seq) => (*seq).into_iter().next().unwrap_or_default(),
        other => other,
    }
}

/// Flatten a result shape into one flat sequence.
///
/// When the last element is a sequence it is expanded in place and every
/// earlier sequence collapses to its first value. Otherwise every sequence,
/// wherever it sits, collapses and the length is unchanged.
pub fn flatten_results(mut results: ResultSequence) -> ResultSequence {
    match results.pop() {
        None => results,
        Some(Value::Multi(tail)) => {
            let mut flat = ResultSequence::with_capacity(results.len() + tail.len());
            flat.extend(results.into_iter().map(first_value));
            flat.extend(*tail);
            flat
        }
        Some(last) => {
            results.push(last);
            for slot in results.iter_mut() {
                if matches!(slot, Value::Multi(_)) {
                    *slot = first_value(std::mem::take(slot));
                }
            }
            results
        }
    }
}

/// Read `results[index]`, or `Nil` when the sequence is absent or too short
pub fn safe_index(results: Option<&[Value]>, index: usize) -> Value {
    results
        .and_then(|values| values.get(index))
        .cloned()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use moonlet_std_core::results;

    #[test]
    fn test_flatten_expands_last_sequence() {
        let flat = flatten_results(results![1, 2, results![10, 20, 30]]);
        assert_eq!(flat, results![1, 2, 10, 20, 30]);
    }

    #[test]
    fn test_flatten_collapses_earlier_sequences() {
        assert_eq!(flatten_results(results![results![5, 6], 7]), results![5, 7]);
        assert_eq!(
            flatten_results(results![results![], 7]),
            results![Value::Nil, 7]
        );
    }

    #[test]
    fn test_flatten_collapses_before_expanding_tail() {
        let flat = flatten_results(results![results![1, 2], results![3, 4]]);
        assert_eq!(flat, results![1, 3, 4]);
    }

    #[test]
    fn test_flatten_trailing_empty_sequence_contributes_nothing() {
        let flat = flatten_results(results![1, results![]]);
        assert_eq!(flat, results![1]);
        assert_eq!(flat.len(), 1);
    }

    #[test]
    fn test_flatten_length_rule() {
        let tail = results![7, 8, 9, 10];
        let input = results![1, "a", tail.clone()];
        let expected_len = input.len() - 1 + tail.len();
        assert_eq!(flatten_results(input).len(), expected_len);

        let input = results![1, results![2, 3], "x"];
        assert_eq!(flatten_results(input).len(), 3);
    }

    #[test]
    fn test_flatten_keeps_nested_values_of_the_tail() {
        let flat = flatten_results(results![results![1, results![2]]]);
        assert_eq!(flat, results![1, results![2]]);
    }

    #[test]
    fn test_flatten_empty_unchanged() {
        assert!(flatten_results(results![]).is_empty());
    }

    #[test]
    fn test_safe_index() {
        assert_eq!(safe_index(None, 3), Value::Nil);
        let seq = results![1, 2];
        assert_eq!(safe_index(Some(&seq[..]), 5), Value::Nil);
        assert_eq!(safe_index(Some(&seq[..]), 1), Value::int(2));
        assert_eq!(safe_index(Some(&[][..]), 0), Value::Nil);
    }

    #[test]
    fn test_first_value() {
        assert_eq!(first_value(Value::from(results![4, 5])), Value::int(4));
        assert_eq!(first_value(Value::from(results![])), Value::Nil);
        assert_eq!(first_value(Value::from("s")), Value::from("s"));
    }
}
