//! Core traits for reusable pipeline stages
//!
//! Closures cover most one-off rules and parsers. These traits exist for
//! stages that carry configuration (bounds, patterns, defaults) and are worth
//! naming as types; see [`crate::rules`] and [`crate::parsers`].

use crate::foundation::Check;
use serde_json::Value;
use std::borrow::Cow;

// ============================================================================
// RULE
// ============================================================================

/// A named test over a field value.
///
/// `value` is `None` when the field is undefined (absent from the input and
/// not produced by a parser).
///
/// # Examples
///
/// ```rust,ignore
/// use tessera_validator::foundation::{Check, Rule};
/// use serde_json::Value;
/// use std::borrow::Cow;
///
/// struct Even;
///
/// impl Rule for Even {
///     fn name(&self) -> Cow<'static, str> {
///         Cow::Borrowed("even")
///     }
///
///     fn check(&self, value: Option<&Value>) -> Check {
///         match value.and_then(Value::as_i64) {
///             Some(n) => Check::ensure(n % 2 == 0, "must be even"),
///             None => Check::Pass,
///         }
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Stage name used in error messages.
    fn name(&self) -> Cow<'static, str>;

    /// Tests the current field value.
    fn check(&self, value: Option<&Value>) -> Check;
}

// ============================================================================
// PARSER
// ============================================================================

/// A named transformation of a field value that may fail.
///
/// Parsers receive the value produced by the previous parser (or the raw
/// input value) and return the replacement. Returning `Ok(None)` leaves the
/// field undefined.
pub trait Parser: Send + Sync {
    /// Stage name used in error messages.
    fn name(&self) -> Cow<'static, str>;

    /// Transforms the current field value.
    fn parse(&self, value: Option<Value>) -> Result<Option<Value>, String>;
}
