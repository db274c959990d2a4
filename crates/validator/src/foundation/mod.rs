//! Core validation types and traits
//!
//! This module contains the building blocks shared by the registry, the
//! engine and every rule or parser:
//!
//! - **Rule results**: [`Check`]
//! - **Errors**: [`ValidationError`], [`ValidationErrors`], [`UsageError`]
//! - **Traits**: [`Rule`], [`Parser`]
//!
//! # Two kinds of failure
//!
//! Field failures are data-dependent and always collected, so one call
//! reports every problem in the input:
//!
//! ```rust,ignore
//! let error = ValidationError::new("min-length", "name", "must have a length of at least 3, got 1");
//! assert_eq!(error.to_string(), "min-length(name): must have a length of at least 3, got 1");
//! ```
//!
//! Usage errors describe programmer mistakes (unregistered class, input that
//! is not an object) and abort the call before any field is inspected.

pub mod check;
pub mod error;
pub mod traits;

pub use check::Check;
pub use error::{Outcome, UsageError, ValidationError, ValidationErrors};
pub use traits::{Parser, Rule};
