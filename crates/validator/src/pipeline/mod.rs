//! Field pipelines
//!
//! Registration API used while a class is being set up:
//!
//! ```rust,ignore
//! use tessera_validator::prelude::*;
//!
//! struct Person;
//!
//! let registry = PipelineRegistry::new();
//! let person = registry.class_of::<Person>();
//!
//! person
//!     .field("age", DeclaredType::Number)
//!     .parse_with(to_number())
//!     .type_checked()
//!     .custom_rule(|age: Option<&Value>| {
//!         Check::ensure(age.and_then(Value::as_f64).is_some_and(|a| a > 18.0), "Min Age 18")
//!     });
//! ```
//!
//! Parsers and rules run in the order they were registered.

pub mod builder;
pub mod stage;

pub use builder::{ClassBuilder, FieldBuilder};
pub use stage::{ParserStage, RuleStage};

/// Default name of rules registered without one.
pub const CUSTOM_RULE: &str = "custom-rule";

/// Default name of parsers registered without one.
pub const CUSTOM_PARSER: &str = "custom-parser";
