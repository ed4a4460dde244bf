use crate::Value;

/// Renders `value` through a brace format string such as `"{}"`, `"{:.2} mm"`
/// or `"{:s}, "`. Multi-valued inputs are formatted element by element and
/// concatenated; any separator has to come from the format string itself.
pub fn format_value(format: &str, value: &Value) -> String {
    match value {
        Value::List(items) => items.iter().map(|item| format_value(format, item)).collect(),
        _ => format_single(format, value),
    }
}

fn format_single(format: &str, value: &Value) -> String {
    let mut out = String::new();
    let mut chars = format.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut spec = String::new();
                for next in chars.by_ref() {
                    if next == '}' {
                        break;
                    }
                    spec.push(next);
                }
                out.push_str(&apply_spec(spec.trim_start_matches(':'), value));
            }
            _ => out.push(c),
        }
    }
    out
}

fn apply_spec(spec: &str, value: &Value) -> String {
    let precision = spec
        .strip_prefix('.')
        .map(|rest| rest.trim_end_matches(|c: char| c.is_ascii_alphabetic()))
        .and_then(|digits| digits.parse::<usize>().ok());
    match (precision, value) {
        (Some(precision), Value::Number(n)) => format!("{n:.precision$}"),
        _ => value.to_string(),
    }
}
