//! Built-in rules
//!
//! Ready-to-use [`Rule`](crate::foundation::Rule) implementations for common
//! constraints. Register them with
//! [`FieldBuilder::validate_with`](crate::pipeline::FieldBuilder::validate_with).
//!
//! Each rule only judges the JSON kind it is about: a number handed to
//! `min_length`, or `null` and undefined handed to anything, passes. Checking
//! the kind itself is the job of
//! [`type_checked`](crate::pipeline::FieldBuilder::type_checked).
//!
//! # Examples
//!
//! ```rust,ignore
//! use tessera_validator::prelude::*;
//!
//! registry
//!     .class_of::<User>()
//!     .field("username", DeclaredType::String)
//!     .type_checked()
//!     .validate_with(min_length(3))
//!     .validate_with(max_length(20))
//!     .validate_with(pattern("^[a-z0-9_]+$")?);
//! ```

pub mod content;
pub mod length;
pub mod numeric;

pub use content::{OneOf, Pattern, one_of, pattern};
pub use length::{MaxLength, MinLength, NotEmpty, max_length, min_length, not_empty};
pub use numeric::{InRange, Max, Min, in_range, max, min};
