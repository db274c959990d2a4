//! Built-in parsers
//!
//! Parsers normalise raw input before rules see it. Register them with
//! [`FieldBuilder::parse_with`](crate::pipeline::FieldBuilder::parse_with):
//!
//! ```rust,ignore
//! registry
//!     .class_of::<Order>()
//!     .field("quantity", DeclaredType::Number)
//!     .parse_with(to_number())
//!     .parse_with(default_to(json!(1)))
//!     .type_checked();
//! ```
//!
//! Undefined and `null` pass through unchanged unless a parser is about them.

use crate::foundation::Parser;
use serde_json::{Number, Value};
use std::borrow::Cow;

// ============================================================================
// TO NUMBER
// ============================================================================

/// Converts numeric strings into numbers.
///
/// Integers stay integers (`"42"` becomes `42`, not `42.0`). Surrounding
/// whitespace is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ToNumber;

impl Parser for ToNumber {
    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed("to-number")
    }

    fn parse(&self, value: Option<Value>) -> Result<Option<Value>, String> {
        match value {
            Some(Value::String(s)) => parse_number(s.trim())
                .map(|n| Some(Value::Number(n)))
                .ok_or_else(|| format!("cannot convert {} to a number", Value::String(s))),
            Some(Value::Number(_) | Value::Null) | None => Ok(value),
            Some(other) => Err(format!("cannot convert {other} to a number")),
        }
    }
}

fn parse_number(s: &str) -> Option<Number> {
    if let Ok(n) = s.parse::<i64>() {
        return Some(n.into());
    }
    s.parse::<f64>().ok().and_then(Number::from_f64)
}

/// Creates a [`ToNumber`] parser.
#[must_use]
pub const fn to_number() -> ToNumber {
    ToNumber
}

// ============================================================================
// TO BOOLEAN
// ============================================================================

/// Converts the strings `"true"` and `"false"` into booleans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ToBoolean;

impl Parser for ToBoolean {
    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed("to-boolean")
    }

    fn parse(&self, value: Option<Value>) -> Result<Option<Value>, String> {
        match value {
            Some(Value::String(s)) => match s.as_str() {
                "true" => Ok(Some(Value::Bool(true))),
                "false" => Ok(Some(Value::Bool(false))),
                _ => Err(format!("cannot convert {} to a boolean", Value::String(s))),
            },
            Some(Value::Bool(_) | Value::Null) | None => Ok(value),
            Some(other) => Err(format!("cannot convert {other} to a boolean")),
        }
    }
}

/// Creates a [`ToBoolean`] parser.
#[must_use]
pub const fn to_boolean() -> ToBoolean {
    ToBoolean
}

// ============================================================================
// TRIM
// ============================================================================

/// Strips leading and trailing whitespace from strings. Never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Trim;

impl Parser for Trim {
    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed("trim")
    }

    fn parse(&self, value: Option<Value>) -> Result<Option<Value>, String> {
        Ok(match value {
            Some(Value::String(s)) if s.trim().len() != s.len() => {
                Some(Value::String(s.trim().to_owned()))
            }
            other => other,
        })
    }
}

/// Creates a [`Trim`] parser.
#[must_use]
pub const fn trim() -> Trim {
    Trim
}

// ============================================================================
// DEFAULT
// ============================================================================

/// Replaces an undefined value with a fixed one. `null` is left alone.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultTo {
    /// Value used when the field is undefined
    pub value: Value,
}

impl Parser for DefaultTo {
    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed("default")
    }

    fn parse(&self, value: Option<Value>) -> Result<Option<Value>, String> {
        Ok(value.or_else(|| Some(self.value.clone())))
    }
}

/// Creates a [`DefaultTo`] parser.
#[must_use]
pub fn default_to(value: impl Into<Value>) -> DefaultTo {
    DefaultTo {
        value: value.into(),
    }
}
