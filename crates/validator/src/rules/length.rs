//! Length rules
//!
//! Strings are measured in Unicode scalar values (chars), arrays in
//! elements.

use crate::foundation::Check;
use serde_json::Value;

/// Length of a string or array value.
fn measure(value: Option<&Value>) -> Option<usize> {
    match value? {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

// ============================================================================
// NOT EMPTY
// ============================================================================

crate::rule! {
    /// Rejects empty strings, arrays and objects.
    pub NotEmpty = "not-empty";
    check(value) {
        let empty = match value {
            Some(Value::String(s)) => s.is_empty(),
            Some(Value::Array(items)) => items.is_empty(),
            Some(Value::Object(map)) => map.is_empty(),
            _ => false,
        };
        Check::ensure(!empty, "must not be empty")
    }
    fn not_empty();
}

// ============================================================================
// MIN LENGTH
// ============================================================================

crate::rule! {
    /// Requires a string or array to have at least `min` elements.
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub MinLength { min: usize } = "min-length";
    check(self, value) {
        match measure(value) {
            Some(len) if len < self.min => {
                Check::fail(format!("must have a length of at least {}, got {len}", self.min))
            }
            _ => Check::Pass,
        }
    }
    fn min_length(min: usize);
}

// ============================================================================
// MAX LENGTH
// ============================================================================

crate::rule! {
    /// Requires a string or array to have at most `max` elements.
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub MaxLength { max: usize } = "max-length";
    check(self, value) {
        match measure(value) {
            Some(len) if len > self.max => {
                Check::fail(format!("must have a length of at most {}, got {len}", self.max))
            }
            _ => Check::Pass,
        }
    }
    fn max_length(max: usize);
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::Rule;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!(""), false)]
    #[case(json!([]), false)]
    #[case(json!({}), false)]
    #[case(json!(" "), true)]
    #[case(json!([0]), true)]
    #[case(json!(0), true)]
    #[case(json!(null), true)]
    fn not_empty_cases(#[case] value: Value, #[case] passes: bool) {
        assert_eq!(not_empty().check(Some(&value)).is_pass(), passes);
    }

    #[test]
    fn not_empty_ignores_undefined() {
        assert!(not_empty().check(None).is_pass());
        assert_eq!(not_empty().name(), "not-empty");
    }

    #[test]
    fn lengths_count_chars_not_bytes() {
        let rule = max_length(3);
        assert!(rule.check(Some(&json!("héé"))).is_pass());
        assert_eq!(
            rule.check(Some(&json!("abcd"))).message(),
            Some("must have a length of at most 3, got 4")
        );
    }

    #[rstest]
    #[case(json!("ab"), Some("must have a length of at least 3, got 2"))]
    #[case(json!([1, 2]), Some("must have a length of at least 3, got 2"))]
    #[case(json!("abc"), None)]
    #[case(json!(12), None)]
    fn min_length_cases(#[case] value: Value, #[case] expected: Option<&str>) {
        let rule = min_length(3);
        assert_eq!(rule.name(), "min-length");
        assert_eq!(rule.check(Some(&value)).message(), expected);
    }
}
