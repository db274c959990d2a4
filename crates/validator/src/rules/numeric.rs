//! Numeric rules

use crate::foundation::Check;
use serde_json::Value;

fn number(value: Option<&Value>) -> Option<(f64, &Value)> {
    let value = value?;
    value.as_f64().map(|n| (n, value))
}

crate::rule! {
    /// Requires a number to be at least `min`.
    #[derive(Copy, PartialEq)]
    pub Min { min: f64 } = "min";
    check(self, value) {
        match number(value) {
            Some((n, raw)) if n < self.min => Check::fail(format!("must be at least {}, got {raw}", self.min)),
            _ => Check::Pass,
        }
    }
    fn min(min: f64);
}

crate::rule! {
    /// Requires a number to be at most `max`.
    #[derive(Copy, PartialEq)]
    pub Max { max: f64 } = "max";
    check(self, value) {
        match number(value) {
            Some((n, raw)) if n > self.max => Check::fail(format!("must be at most {}, got {raw}", self.max)),
            _ => Check::Pass,
        }
    }
    fn max(max: f64);
}

crate::rule! {
    /// Requires a number to lie within `min..=max`.
    #[derive(Copy, PartialEq)]
    pub InRange { min: f64, max: f64 } = "in-range";
    check(self, value) {
        match number(value) {
            Some((n, raw)) if !(self.min..=self.max).contains(&n) => Check::fail(format!(
                "must be between {} and {}, got {raw}",
                self.min, self.max
            )),
            _ => Check::Pass,
        }
    }
    fn in_range(min: f64, max: f64);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::Rule;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!(17), Some("must be at least 18, got 17"))]
    #[case(json!(17.5), Some("must be at least 18, got 17.5"))]
    #[case(json!(18), None)]
    #[case(json!("17"), None)]
    #[case(json!(null), None)]
    fn min_cases(#[case] value: Value, #[case] expected: Option<&str>) {
        assert_eq!(min(18.0).check(Some(&value)).message(), expected);
    }

    #[test]
    fn max_rejects_larger_numbers() {
        let rule = max(10.0);
        assert_eq!(rule.name(), "max");
        assert!(rule.check(Some(&json!(10))).is_pass());
        assert_eq!(
            rule.check(Some(&json!(11))).message(),
            Some("must be at most 10, got 11")
        );
    }

    #[rstest]
    #[case(json!(0), true)]
    #[case(json!(120), true)]
    #[case(json!(-1), false)]
    #[case(json!(121), false)]
    fn in_range_is_inclusive(#[case] value: Value, #[case] passes: bool) {
        assert_eq!(in_range(0.0, 120.0).check(Some(&value)).is_pass(), passes);
    }

    #[test]
    fn in_range_message() {
        assert_eq!(
            in_range(0.0, 1.5).check(Some(&json!(2))).message(),
            Some("must be between 0 and 1.5, got 2")
        );
        assert!(in_range(0.0, 1.0).check(None).is_pass());
    }
}
