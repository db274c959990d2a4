//! Declared field types and the built-in type-check rule.

use crate::pipeline::RuleStage;
use crate::registry::ClassRef;
use crate::foundation::Check;
use serde_json::Value;
use std::fmt;

/// Stage name of the rule added by [`FieldBuilder::type_checked`](crate::pipeline::FieldBuilder::type_checked).
pub const TYPE_CHECK_STAGE: &str = "validate-design-type";

/// The type a field is declared with.
///
/// Primitive variants correspond to JSON value kinds. `Class` refers to
/// another class; when that class has a registered pipeline, plain JSON
/// objects supplied for the field are validated recursively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclaredType {
    /// JSON string
    String,
    /// JSON number
    Number,
    /// JSON boolean
    Boolean,
    /// JSON array
    Array,
    /// JSON object
    Object,
    /// Another class
    Class(ClassRef),
}

impl DeclaredType {
    /// Declared type referring to the Rust type `T`.
    pub fn class<T: ?Sized + 'static>() -> Self {
        Self::Class(ClassRef::of::<T>())
    }

    /// Name used in type-check messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Number => "Number",
            Self::Boolean => "Boolean",
            Self::Array => "Array",
            Self::Object => "Object",
            Self::Class(class) => class.name(),
        }
    }

    /// The referenced class, if any.
    pub fn as_class(&self) -> Option<ClassRef> {
        match self {
            Self::Class(class) => Some(*class),
            _ => None,
        }
    }

    /// Returns true if `value` is an instance of this type.
    ///
    /// Undefined and `null` never match. A plain JSON object is not an
    /// instance of a class; classes are reached through nested validation.
    pub fn matches(&self, value: Option<&Value>) -> bool {
        match (self, value) {
            (Self::String, Some(Value::String(_)))
            | (Self::Number, Some(Value::Number(_)))
            | (Self::Boolean, Some(Value::Bool(_)))
            | (Self::Array, Some(Value::Array(_)))
            | (Self::Object, Some(Value::Object(_))) => true,
            _ => false,
        }
    }

    /// Builds the `validate-design-type` rule for this type.
    pub fn type_check_rule(self) -> RuleStage {
        RuleStage::new(TYPE_CHECK_STAGE, move |value: Option<&Value>| {
            if self.matches(value) {
                Check::Pass
            } else {
                Check::fail(format!(
                    "Expected `{}`, but got `{}`",
                    self.name(),
                    render(value)
                ))
            }
        })
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Renders a field value for messages: compact JSON, or `undefined`.
pub fn render(value: Option<&Value>) -> String {
    value.map_or_else(|| "undefined".to_owned(), Value::to_string)
}

/// Describes the kind of a JSON value with an article, for usage errors.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
