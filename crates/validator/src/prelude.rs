//! Prelude module for convenient imports.
//!
//! Provides a single `use tessera_validator::prelude::*;` import that brings
//! in the registration API, the engine entry points and every built-in rule
//! and parser.

// ============================================================================
// FOUNDATION: Rule results, errors, traits
// ============================================================================

pub use crate::foundation::{
    Check, Outcome, Parser, Rule, UsageError, ValidationError, ValidationErrors,
};

// ============================================================================
// REGISTRATION
// ============================================================================

pub use crate::design_type::DeclaredType;
pub use crate::model::{Validated, register};
pub use crate::pipeline::{ClassBuilder, FieldBuilder};
pub use crate::registry::{ClassRef, PipelineRegistry};

// ============================================================================
// ENGINE
// ============================================================================

pub use crate::config::ValidatorConfig;
pub use crate::engine::{Validator, create_instance, create_validated};
pub use crate::instance::{FieldValue, Instance};

// ============================================================================
// BUILT-IN STAGES
// ============================================================================

#[allow(clippy::wildcard_imports)]
pub use crate::parsers::*;
#[allow(clippy::wildcard_imports)]
pub use crate::rules::*;

// ============================================================================
// JSON
// ============================================================================

pub use serde_json::{Value, json};
