//!
//! Table-Constructor Spreading
//!
//! In `{a, b, f()}` only the last entry may contribute several values.
//! Compiled code stores the earlier entries directly and hands the last one
//! to `spread_into`, which writes every element of a sequence or array at
//! consecutive indices, or a scalar at a single index.
//!

use moonlet_std_core::{Table, Value};

/// Write `value` into `table` starting at `start_index` and return the table
pub fn spread_into<T: Table + ?Sized>(table: &mut T, value: Value, start_index: i64) -> &mut T {
    match value {
        Value::Multi(values) => {
            for (index, element) in (start_index..).zip(*values) {
                table.set_index(index, element);
            }
        }
        Value::Array(array) => {
            for (index, element) in (start_index..).zip(array.items().iter().cloned()) {
                table.set_index(index, element);
            }
        }
        scalar => table.set_index(start_index, scalar),
    }
    table
}
