//!
//! String Concatenation
//!
//! The compiler lowers a `..` chain to one call with every operand already
//! converted to text, so the result is allocated exactly once.
//!

pub fn string_concat<S: AsRef<str>>(parts: &[S]) -> String {
    let len = parts.iter().map(|part| part.as_ref().len()).sum();
    let mut joined = String::with_capacity(len);
    for part in parts {
        joined.push_str(part.as_ref());
    }
    joined
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_concat() {
        assert_eq!(string_concat(&["moon", "let", "!"]), "moonlet!");
        assert_eq!(string_concat(&[String::from("a"), String::new()]), "a");
        assert_eq!(string_concat::<&str>(&[]), "");
    }
}
