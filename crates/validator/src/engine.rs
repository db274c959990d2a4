//! Validation engine
//!
//! Walks the registered pipelines of a class over a JSON object and either
//! builds an [`Instance`] from the final field values or returns every field
//! failure at once.
//!
//! Per declared field, in registration order:
//!
//! 1. parsers run in order; the first failure ends the field
//! 2. `null` with `nullable()` or undefined with `optional()` ends the field
//!    without error
//! 3. a JSON object for a registered class is validated recursively, and the
//!    field's rules are skipped
//! 4. otherwise every rule runs, without short-circuiting
//!
//! Calls return `Result<Outcome<_>, UsageError>`: the outer error is API
//! misuse, the inner one is the collected field failures.

use crate::config::ValidatorConfig;
use crate::design_type::json_kind;
use crate::foundation::error::{CONSTRUCT_STAGE, NESTED_STAGE};
use crate::foundation::{Outcome, UsageError, ValidationError, ValidationErrors};
use crate::instance::{FieldValue, Instance};
use crate::registry::{ClassPipelineContext, ClassRef, FieldPipelineContext, PipelineRegistry};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, trace, warn};

/// Runs registered pipelines against input data.
///
/// # Examples
///
/// ```rust,ignore
/// use tessera_validator::prelude::*;
///
/// struct Person;
///
/// let registry = PipelineRegistry::new();
/// let person = registry.class_of::<Person>();
/// person.field("name", DeclaredType::String).type_checked();
/// person.field("age", DeclaredType::Number).type_checked();
///
/// let validator = Validator::new(&registry);
/// let errors = validator
///     .create_instance(ClassRef::of::<Person>(), &json!({"name": 12}))?
///     .unwrap_err();
///
/// assert_eq!(errors.messages(), vec![
///     "validate-design-type(name): Expected `String`, but got `12`",
///     "validate-design-type(age): Expected `Number`, but got `undefined`",
/// ]);
/// ```
#[derive(Debug, Clone)]
pub struct Validator<'r> {
    registry: &'r PipelineRegistry,
    config: ValidatorConfig,
}

impl<'r> Validator<'r> {
    /// Creates a validator over `registry` with the default configuration.
    pub fn new(registry: &'r PipelineRegistry) -> Self {
        Self {
            registry,
            config: ValidatorConfig::default(),
        }
    }

    /// Replaces the configuration.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// The registry pipelines are read from.
    pub fn registry(&self) -> &'r PipelineRegistry {
        self.registry
    }

    /// Validates `data` against the pipelines of `class`.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::Unregistered`] if `class` has no context and
    /// [`UsageError::NotAnObject`] if `data` is not a JSON object.
    pub fn create_instance(
        &self,
        class: ClassRef,
        data: &Value,
    ) -> Result<Outcome<Instance>, UsageError> {
        let context = self.registry.class_context(class).ok_or_else(|| {
            warn!(class = %class, "validation requested for unregistered class");
            UsageError::Unregistered { class: class.name() }
        })?;

        let class = context.class();
        let Value::Object(object) = data else {
            let found = json_kind(data);
            warn!(class = %class, found, "validation input is not an object");
            return Err(UsageError::NotAnObject {
                class: class.name(),
                found,
            });
        };

        debug!(class = %class, fields = context.len(), "validating");
        let outcome = self.validate_object(&context, object, 0);
        match &outcome {
            Ok(instance) => debug!(class = %class, fields = instance.len(), "validation passed"),
            Err(errors) => debug!(class = %class, errors = errors.len(), "validation failed"),
        }
        Ok(outcome)
    }

    /// Validates `data` and deserializes the resulting instance into `T`.
    ///
    /// `T` must be registered; see [`register`](crate::model::register).
    ///
    /// # Errors
    ///
    /// Same usage errors as [`Validator::create_instance`].
    pub fn create_validated<T: DeserializeOwned + 'static>(
        &self,
        data: &Value,
    ) -> Result<Outcome<T>, UsageError> {
        let outcome = self.create_instance(ClassRef::of::<T>(), data)?;
        Ok(outcome.and_then(|instance| construct(&instance)))
    }

    fn validate_object(
        &self,
        context: &ClassPipelineContext,
        object: &Map<String, Value>,
        depth: usize,
    ) -> Outcome<Instance> {
        let mut errors = ValidationErrors::new();
        let mut fields = IndexMap::with_capacity(object.len());

        for (name, field) in context.fields() {
            match self.run_field(name, field, object.get(name).cloned(), depth) {
                Ok(Some(value)) => {
                    fields.insert(name.to_owned(), value);
                }
                Ok(None) => {}
                Err(field_errors) => errors.extend(field_errors),
            }
        }

        if errors.has_errors() {
            return Err(errors);
        }

        if self.config.copy_undeclared_fields {
            for (key, value) in object {
                if !context.contains_field(key) {
                    fields.insert(key.clone(), FieldValue::Json(value.clone()));
                }
            }
        }

        Ok(Instance::from_validated_fields(context.class(), fields))
    }

    /// Runs one field pipeline. `Ok(None)` means the field stays absent.
    fn run_field(
        &self,
        name: &str,
        field: &FieldPipelineContext,
        input: Option<Value>,
        depth: usize,
    ) -> Outcome<Option<FieldValue>> {
        let mut value = input;
        for parser in field.parsers() {
            trace!(field = name, parser = parser.name(), "running parser");
            match parser.parse(value) {
                Ok(parsed) => value = parsed,
                Err(message) => {
                    trace!(field = name, parser = parser.name(), %message, "parser failed");
                    return Err(ValidationError::new(parser.stage_name(), name, message).into());
                }
            }
        }

        match &value {
            None if field.allow_undefined() => {
                trace!(field = name, "undefined value allowed");
                return Ok(None);
            }
            Some(Value::Null) if field.allow_null() => {
                trace!(field = name, "null value allowed");
                return Ok(Some(FieldValue::Json(Value::Null)));
            }
            _ => {}
        }

        if let (Some(class), Some(Value::Object(object))) = (field.declared_type().as_class(), &value) {
            if let Some(nested) = self.registry.class_context(class) {
                return self.run_nested(name, &nested, object, depth);
            }
        }

        let mut errors = ValidationErrors::new();
        for rule in field.rules() {
            if let Some(message) = rule.check(value.as_ref()).into_message() {
                trace!(field = name, rule = rule.name(), %message, "rule failed");
                errors.add(ValidationError::new(rule.stage_name(), name, message));
            }
        }
        errors.into_result(value.map(FieldValue::Json))
    }

    fn run_nested(
        &self,
        name: &str,
        context: &ClassPipelineContext,
        object: &Map<String, Value>,
        depth: usize,
    ) -> Outcome<Option<FieldValue>> {
        if depth >= self.config.max_depth {
            warn!(field = name, max_depth = self.config.max_depth, "nesting depth exceeded");
            return Err(ValidationError::new(
                NESTED_STAGE,
                name,
                format!("maximum nesting depth of {} exceeded", self.config.max_depth),
            )
            .into());
        }

        trace!(field = name, class = %context.class(), depth = depth + 1, "validating nested class");
        self.validate_object(context, object, depth + 1)
            .map(|instance| Some(FieldValue::Nested(instance)))
            .map_err(|errors| errors.into_iter().map(|error| error.nested_in(name)).collect())
    }
}

fn construct<T: DeserializeOwned>(instance: &Instance) -> Outcome<T> {
    instance.deserialize::<T>().map_err(|err| {
        let class = instance.class();
        debug!(class = %class, error = %err, "constructing instance failed");
        ValidationError::new(CONSTRUCT_STAGE, class.name(), err.to_string()).into()
    })
}

/// Validates `data` against the global registry and deserializes it into `T`.
///
/// # Errors
///
/// See [`Validator::create_instance`].
pub fn create_validated<T: DeserializeOwned + 'static>(
    data: &Value,
) -> Result<Outcome<T>, UsageError> {
    Validator::new(PipelineRegistry::global()).create_validated::<T>(data)
}

/// Validates `data` against the global registry pipelines of `class`.
///
/// # Errors
///
/// See [`Validator::create_instance`].
pub fn create_instance(class: ClassRef, data: &Value) -> Result<Outcome<Instance>, UsageError> {
    Validator::new(PipelineRegistry::global()).create_instance(class, data)
}
