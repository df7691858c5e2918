//! Identifier coercion policy
//!
//! Model output often carries numeric identifiers as strings (`"4001"`) or
//! floats (`4001.0`). Whether those count is a policy decision, made
//! explicit here rather than left to a generic integer parse.

use lognorm_domain::IdentifierCoercion;
use serde_json::Value;

/// Turn a JSON value into an identifier under the given policy
///
/// - `Strict`: only JSON integers that fit in `i64`
/// - `Lenient`: additionally integral floats and trimmed decimal strings
///
/// Anything else (booleans, objects, fractional numbers, non-numeric text)
/// resolves to `None`.
pub fn resolve_identifier(value: &Value, policy: IdentifierCoercion) -> Option<i64> {
    if let Some(n) = integer_value(value) {
        return Some(n);
    }
    if policy == IdentifierCoercion::Strict {
        return None;
    }

    match value {
        Value::Number(number) => number.as_f64().and_then(integral_f64),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Whether the value is a JSON integer (not a float, not a string)
pub fn is_genuine_integer(value: &Value) -> bool {
    integer_value(value).is_some()
}

fn integer_value(value: &Value) -> Option<i64> {
    let Value::Number(number) = value else {
        return None;
    };
    number
        .as_i64()
        .or_else(|| number.as_u64().and_then(|n| i64::try_from(n).ok()))
}

fn integral_f64(n: f64) -> Option<i64> {
    // i64::MAX is not representable as f64; stay strictly inside the range.
    if n.is_finite() && n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
        Some(n as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integers_resolve_under_both_policies() {
        for policy in [IdentifierCoercion::Lenient, IdentifierCoercion::Strict] {
            assert_eq!(resolve_identifier(&json!(4001), policy), Some(4001));
            assert_eq!(resolve_identifier(&json!(-3), policy), Some(-3));
        }
    }

    #[test]
    fn test_lenient_accepts_numeric_strings() {
        let lenient = IdentifierCoercion::Lenient;
        assert_eq!(resolve_identifier(&json!("4001"), lenient), Some(4001));
        assert_eq!(resolve_identifier(&json!(" 4001 "), lenient), Some(4001));
        assert_eq!(resolve_identifier(&json!(4001.0), lenient), Some(4001));
    }

    #[test]
    fn test_strict_rejects_strings_and_floats() {
        let strict = IdentifierCoercion::Strict;
        assert_eq!(resolve_identifier(&json!("4001"), strict), None);
        assert_eq!(resolve_identifier(&json!(4001.0), strict), None);
    }

    #[test]
    fn test_unparsable_values() {
        let lenient = IdentifierCoercion::Lenient;
        assert_eq!(resolve_identifier(&json!("network"), lenient), None);
        assert_eq!(resolve_identifier(&json!("40.5"), lenient), None);
        assert_eq!(resolve_identifier(&json!(40.5), lenient), None);
        assert_eq!(resolve_identifier(&json!(true), lenient), None);
        assert_eq!(resolve_identifier(&json!(null), lenient), None);
        assert_eq!(resolve_identifier(&json!({"uid": 1}), lenient), None);
        assert_eq!(resolve_identifier(&json!(u64::MAX), lenient), None);
        assert_eq!(resolve_identifier(&json!(1e300), lenient), None);
    }

    #[test]
    fn test_genuine_integer() {
        assert!(is_genuine_integer(&json!(3)));
        assert!(!is_genuine_integer(&json!(3.0)));
        assert!(!is_genuine_integer(&json!("3")));
        assert!(!is_genuine_integer(&json!(null)));
    }
}
