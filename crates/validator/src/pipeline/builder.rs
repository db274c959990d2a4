//! Fluent registration builders
//!
//! Every builder call is applied to the registry immediately, so a chain can
//! be dropped at any point without losing what it registered.

use super::{CUSTOM_PARSER, CUSTOM_RULE, ParserStage, RuleStage};
use crate::design_type::DeclaredType;
use crate::foundation::{Check, Parser, Rule};
use crate::model::Validated;
use crate::registry::{ClassRef, FieldPipelineContext, PipelineRegistry};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;

// ============================================================================
// CLASS BUILDER
// ============================================================================

/// Registration entry point for one class.
///
/// Created by [`PipelineRegistry::class`]; creating it is enough to register
/// the class with an empty pipeline.
#[derive(Clone, Copy)]
pub struct ClassBuilder<'r> {
    registry: &'r PipelineRegistry,
    class: ClassRef,
}

impl<'r> ClassBuilder<'r> {
    pub(crate) fn new(registry: &'r PipelineRegistry, class: ClassRef) -> Self {
        registry.get_or_create_class_context(class);
        Self { registry, class }
    }

    /// The class being registered.
    pub fn class(&self) -> ClassRef {
        self.class
    }

    /// Declares `name` with `declared_type` and returns its builder.
    ///
    /// Declaring a field twice is harmless: the first declared type is kept
    /// and the returned builder appends to the existing pipeline.
    pub fn field(&self, name: impl Into<String>, declared_type: DeclaredType) -> FieldBuilder<'r> {
        let name = name.into();
        let declared_type = self
            .registry
            .update(self.class, |context| context.declare_field(&name, declared_type).declared_type());
        FieldBuilder {
            registry: self.registry,
            class: self.class,
            name,
            declared_type,
        }
    }

    /// Declares a field holding the validated class `U`, registering `U`
    /// first if needed.
    pub fn nested<U: Validated>(&self, name: impl Into<String>) -> FieldBuilder<'r> {
        self.registry.register::<U>();
        self.field(name, DeclaredType::class::<U>())
    }
}

impl fmt::Debug for ClassBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassBuilder")
            .field("class", &self.class)
            .finish()
    }
}

// ============================================================================
// FIELD BUILDER
// ============================================================================

/// Appends stages and presence flags to one field's pipeline.
pub struct FieldBuilder<'r> {
    registry: &'r PipelineRegistry,
    class: ClassRef,
    name: String,
    declared_type: DeclaredType,
}

impl FieldBuilder<'_> {
    /// Field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type recorded for the field.
    pub fn declared_type(&self) -> DeclaredType {
        self.declared_type
    }

    /// Appends a named rule.
    pub fn rule<F, C>(self, name: impl Into<Cow<'static, str>>, test: F) -> Self
    where
        F: Fn(Option<&Value>) -> C + Send + Sync + 'static,
        C: Into<Check>,
    {
        self.push_rule(RuleStage::new(name, test))
    }

    /// Appends a rule named `custom-rule`.
    pub fn custom_rule<F, C>(self, test: F) -> Self
    where
        F: Fn(Option<&Value>) -> C + Send + Sync + 'static,
        C: Into<Check>,
    {
        self.rule(CUSTOM_RULE, test)
    }

    /// Appends a reusable rule under its own name.
    pub fn validate_with<R: Rule + 'static>(self, rule: R) -> Self {
        self.push_rule(RuleStage::from_rule(rule))
    }

    /// Appends the `validate-design-type` rule for the declared type.
    pub fn type_checked(self) -> Self {
        let rule = self.declared_type.type_check_rule();
        self.push_rule(rule)
    }

    /// Appends a named parser.
    pub fn parser<F, E>(self, name: impl Into<Cow<'static, str>>, parse: F) -> Self
    where
        F: Fn(Option<Value>) -> Result<Option<Value>, E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        self.push_parser(ParserStage::new(name, parse))
    }

    /// Appends a parser named `custom-parser`.
    pub fn custom_parser<F, E>(self, parse: F) -> Self
    where
        F: Fn(Option<Value>) -> Result<Option<Value>, E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        self.parser(CUSTOM_PARSER, parse)
    }

    /// Appends a reusable parser under its own name.
    pub fn parse_with<P: Parser + 'static>(self, parser: P) -> Self {
        self.push_parser(ParserStage::from_parser(parser))
    }

    /// Lets an undefined value skip rules and nested validation.
    pub fn optional(self) -> Self {
        self.update(FieldPipelineContext::set_allow_undefined)
    }

    /// Lets `null` skip rules and nested validation.
    pub fn nullable(self) -> Self {
        self.update(FieldPipelineContext::set_allow_null)
    }

    fn push_rule(self, rule: RuleStage) -> Self {
        self.update(move |field| field.push_rule(rule))
    }

    fn push_parser(self, parser: ParserStage) -> Self {
        self.update(move |field| field.push_parser(parser))
    }

    fn update(self, apply: impl FnOnce(&mut FieldPipelineContext)) -> Self {
        self.registry.update(self.class, |context| {
            apply(context.declare_field(&self.name, self.declared_type));
        });
        self
    }
}

impl fmt::Debug for FieldBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldBuilder")
            .field("class", &self.class)
            .field("name", &self.name)
            .field("declared_type", &self.declared_type)
            .finish()
    }
}
