//! Named pipeline stages
//!
//! A field pipeline is two ordered lists: parsers, then rules. Both are
//! stored type-erased behind `Arc` so class contexts stay cheap to clone.

use crate::foundation::{Check, Parser, Rule};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

type RuleFn = dyn Fn(Option<&Value>) -> Check + Send + Sync;
type ParseFn = dyn Fn(Option<Value>) -> Result<Option<Value>, String> + Send + Sync;

// ============================================================================
// RULE STAGE
// ============================================================================

/// A named rule registered on a field.
#[derive(Clone)]
pub struct RuleStage {
    name: Cow<'static, str>,
    test: Arc<RuleFn>,
}

impl RuleStage {
    /// Creates a rule stage from a closure.
    pub fn new<F, C>(name: impl Into<Cow<'static, str>>, test: F) -> Self
    where
        F: Fn(Option<&Value>) -> C + Send + Sync + 'static,
        C: Into<Check>,
    {
        Self {
            name: name.into(),
            test: Arc::new(move |value: Option<&Value>| test(value).into()),
        }
    }

    /// Creates a rule stage from a reusable [`Rule`].
    pub fn from_rule<R: Rule + 'static>(rule: R) -> Self {
        Self {
            name: rule.name(),
            test: Arc::new(move |value: Option<&Value>| rule.check(value)),
        }
    }

    /// Stage name used in error messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn stage_name(&self) -> Cow<'static, str> {
        self.name.clone()
    }

    /// Runs the rule.
    pub fn check(&self, value: Option<&Value>) -> Check {
        (self.test)(value)
    }
}

impl fmt::Debug for RuleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleStage")
            .field("name", &self.name)
            .field("test", &"<function>")
            .finish()
    }
}

// ============================================================================
// PARSER STAGE
// ============================================================================

/// A named parser registered on a field.
#[derive(Clone)]
pub struct ParserStage {
    name: Cow<'static, str>,
    parse: Arc<ParseFn>,
}

impl ParserStage {
    /// Creates a parser stage from a closure. The error's `Display` output
    /// becomes the reported detail.
    pub fn new<F, E>(name: impl Into<Cow<'static, str>>, parse: F) -> Self
    where
        F: Fn(Option<Value>) -> Result<Option<Value>, E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        Self {
            name: name.into(),
            parse: Arc::new(move |value| parse(value).map_err(|err| err.to_string())),
        }
    }

    /// Creates a parser stage from a reusable [`Parser`].
    pub fn from_parser<P: Parser + 'static>(parser: P) -> Self {
        Self {
            name: parser.name(),
            parse: Arc::new(move |value| parser.parse(value)),
        }
    }

    /// Stage name used in error messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn stage_name(&self) -> Cow<'static, str> {
        self.name.clone()
    }

    /// Runs the parser.
    pub fn parse(&self, value: Option<Value>) -> Result<Option<Value>, String> {
        (self.parse)(value)
    }
}

impl fmt::Debug for ParserStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserStage")
            .field("name", &self.name)
            .field("parse", &"<function>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rule_stage_accepts_option_results() {
        let stage = RuleStage::new("has-value", |value: Option<&Value>| {
            value.is_none().then_some("value required")
        });

        assert_eq!(stage.name(), "has-value");
        assert!(stage.check(Some(&json!(1))).is_pass());
        assert_eq!(stage.check(None).message(), Some("value required"));
    }

    #[test]
    fn parser_stage_renders_errors() {
        let stage = ParserStage::new("halve", |value: Option<Value>| match value {
            Some(Value::Number(n)) => n
                .as_f64()
                .map(|n| Some(json!(n / 2.0)))
                .ok_or("not representable"),
            _ => Err("expected a number"),
        });

        assert_eq!(stage.parse(Some(json!(4))), Ok(Some(json!(2.0))));
        assert_eq!(stage.parse(None), Err("expected a number".to_owned()));
    }

    #[test]
    fn stages_clone_cheaply() {
        let stage = RuleStage::new("noop", |_: Option<&Value>| Check::Pass);
        let copy = stage.clone();
        assert!(Arc::ptr_eq(&stage.test, &copy.test));
    }
}
