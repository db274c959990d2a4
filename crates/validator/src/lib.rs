//! # tessera-validator
//!
//! Turns untyped JSON into validated class instances through per-field
//! pipelines of parsers and rules.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use serde::Deserialize;
//! use tessera_validator::prelude::*;
//!
//! #[derive(Debug, Deserialize)]
//! struct Person {
//!     name: String,
//!     age: f64,
//! }
//!
//! impl Validated for Person {
//!     fn describe(class: &ClassBuilder<'_>) {
//!         class.field("name", DeclaredType::String).type_checked();
//!         class
//!             .field("age", DeclaredType::Number)
//!             .parse_with(to_number())
//!             .type_checked()
//!             .custom_rule(|age: Option<&Value>| {
//!                 Check::ensure(age.and_then(Value::as_f64).is_some_and(|a| a > 18.0), "Min Age 18")
//!             });
//!     }
//! }
//!
//! register::<Person>();
//!
//! let errors = create_validated::<Person>(&json!({"name": "Ann", "age": "12"}))?.unwrap_err();
//! assert_eq!(errors.messages(), vec!["custom-rule(age): Min Age 18"]);
//! ```
//!
//! ## Pieces
//!
//! - [`registry`]: class identity and the per-class field pipelines
//! - [`pipeline`]: the fluent registration builders
//! - [`engine`]: runs pipelines and builds [`Instance`]s
//! - [`rules`] / [`parsers`]: reusable stages, declared with [`rule!`]
//! - [`model`]: the [`Validated`](model::Validated) trait for typed classes
//!
//! ## Error messages
//!
//! Every field failure renders as `<stage>(<field>): <detail>`. Failures in
//! nested classes are prefixed with `validate-nested-class(<field>): ` once per
//! level.

pub mod config;
pub mod design_type;
pub mod engine;
pub mod foundation;
pub mod instance;
mod macros;
pub mod model;
pub mod parsers;
pub mod pipeline;
pub mod prelude;
pub mod registry;
pub mod rules;

pub use config::ValidatorConfig;
pub use design_type::DeclaredType;
pub use engine::{Validator, create_instance, create_validated};
pub use foundation::{Check, Outcome, UsageError, ValidationError, ValidationErrors};
pub use instance::{FieldValue, Instance};
pub use model::{Validated, register};
pub use registry::{ClassRef, PipelineRegistry};
pub use serde_json::Value;
