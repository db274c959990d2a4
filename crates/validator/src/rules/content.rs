//! Content rules

use crate::foundation::Check;
use regex::Regex;
use serde_json::Value;

// ============================================================================
// PATTERN
// ============================================================================

crate::rule! {
    /// Requires a string to match a regular expression.
    ///
    /// The expression is compiled once, when the rule is created.
    pub Pattern { regex: Regex } = "pattern";
    check(self, value) {
        match value {
            Some(Value::String(s)) if !self.regex.is_match(s) => {
                Check::fail(format!("must match pattern `{}`", self.regex.as_str()))
            }
            _ => Check::Pass,
        }
    }
    new(pattern: &str) -> regex::Error {
        Ok(Self { regex: Regex::new(pattern)? })
    }
    fn pattern(pattern: &str) -> regex::Error;
}

// ============================================================================
// ONE OF
// ============================================================================

crate::rule! {
    /// Requires a value to equal one of an allowed set.
    #[derive(PartialEq)]
    pub OneOf { allowed: Vec<Value> } = "one-of";
    check(self, value) {
        match value {
            Some(v) if !v.is_null() && !self.allowed.contains(v) => {
                let allowed: Vec<String> = self.allowed.iter().map(Value::to_string).collect();
                Check::fail(format!("must be one of [{}], got {v}", allowed.join(", ")))
            }
            _ => Check::Pass,
        }
    }
    fn one_of(allowed: Vec<Value>);
}
