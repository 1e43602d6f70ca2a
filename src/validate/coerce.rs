//! Loose conversions applied to pasted JSON values.

use serde_json::Value;

/// Whether a value counts as present for a required text field.
///
/// `null`, `false`, `0`, `NaN` and the empty string are absent.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Numeric conversion of a JSON value.
///
/// Numbers pass through and numeric strings are parsed, including unsigned
/// `0x`, `0o` and `0b` literals. Blank strings, `null` and `false` become
/// `0`; `true` becomes `1`. Anything else is `NaN`.
#[must_use]
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Null | Value::Bool(false) => 0.0,
        Value::Bool(true) => 1.0,
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                parse_numeric(s)
            }
        }
        Value::Array(_) | Value::Object(_) => f64::NAN,
    }
}

fn parse_numeric(s: &str) -> f64 {
    match s {
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        _ if radix_of(s).is_some() => radix_literal(s),
        // Rust accepts "inf" and "nan" spellings that are not numbers here.
        _ if s.chars().any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E')) => f64::NAN,
        _ => s.parse().unwrap_or(f64::NAN),
    }
}

fn radix_of(s: &str) -> Option<u32> {
    match s.get(..2)? {
        "0x" | "0X" => Some(16),
        "0o" | "0O" => Some(8),
        "0b" | "0B" => Some(2),
        _ => None,
    }
}

fn radix_literal(s: &str) -> f64 {
    let Some(radix) = radix_of(s) else { return f64::NAN };
    let digits = &s[2..];
    if digits.is_empty() {
        return f64::NAN;
    }
    digits
        .chars()
        .try_fold(0.0, |acc, c| c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d)))
        .unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truthiness_matches_required_field_rules() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(false)));
        assert!(is_truthy(&json!("x")));
        assert!(is_truthy(&json!(3)));
        assert!(is_truthy(&json!([])));
    }

    #[test]
    fn numeric_conversion() {
        assert!((to_number(&json!(" 12 ")) - 12.0).abs() < f64::EPSILON);
        assert!((to_number(&json!("1e2")) - 100.0).abs() < f64::EPSILON);
        assert!((to_number(&json!("")) - 0.0).abs() < f64::EPSILON);
        assert!((to_number(&json!(true)) - 1.0).abs() < f64::EPSILON);
        assert!(to_number(&json!("abc")).is_nan());
        assert!(to_number(&json!("inf")).is_nan());
        assert!(to_number(&json!({"a": 1})).is_nan());
        assert!(to_number(&json!("Infinity")).is_infinite());
    }

    #[test]
    fn prefixed_integer_literals() {
        assert!((to_number(&json!("0x10")) - 16.0).abs() < f64::EPSILON);
        assert!((to_number(&json!("0XfF")) - 255.0).abs() < f64::EPSILON);
        assert!((to_number(&json!("0b1")) - 1.0).abs() < f64::EPSILON);
        assert!((to_number(&json!("0o7")) - 7.0).abs() < f64::EPSILON);
        assert!((to_number(&json!(" 0x10 ")) - 16.0).abs() < f64::EPSILON);
        assert!(to_number(&json!("-0x10")).is_nan());
        assert!(to_number(&json!("0x+1")).is_nan());
        assert!(to_number(&json!("0x")).is_nan());
        assert!(to_number(&json!("0b2")).is_nan());
        assert!(to_number(&json!("0x1.5")).is_nan());
    }
}
