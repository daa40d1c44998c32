use moonlet_std_core::Value;

/// Read a command-line literal as a script value.
///
/// `nil`, `true` and `false` are keywords, integers become `i64`, other
/// numbers `f64`. Anything else is a string; surrounding double quotes are
/// dropped so `"42"` stays text.
pub fn parse_literal(text: &str) -> Value {
    match text {
        "nil" => return Value::Nil,
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    if let Some(quoted) = text
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        return Value::string(quoted);
    }

    if let Ok(int) = text.parse::<i64>() {
        return Value::int(int);
    }
    match text.parse::<f64>() {
        Ok(float) if float.is_finite() => Value::float(float),
        _ => Value::string(text),
    }
}
