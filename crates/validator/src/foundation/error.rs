//! Error types for validation failures
//!
//! Field failures are structured ([`ValidationError`]) but render to a stable,
//! human-readable string:
//!
//! ```text
//! <stage>(<field>): <detail>
//! validate-nested-class(<outer>): <stage>(<field>): <detail>
//! ```
//!
//! The nested prefix repeats once per level of nesting, outermost first.

use serde::ser::{Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

/// Stage name used when a nested class fails validation.
pub const NESTED_STAGE: &str = "validate-nested-class";

/// Stage name used when a validated instance cannot be turned into its
/// target Rust type.
pub const CONSTRUCT_STAGE: &str = "construct-instance";

/// The two-variant outcome of a validation call.
pub type Outcome<T> = Result<T, ValidationErrors>;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A single field failure.
///
/// # Examples
///
/// ```rust,ignore
/// use tessera_validator::foundation::ValidationError;
///
/// let error = ValidationError::new("custom-rule", "zip", "too short").nested_in("address");
/// assert_eq!(
///     error.to_string(),
///     "validate-nested-class(address): custom-rule(zip): too short"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ValidationError {
    /// Name of the pipeline stage that failed (parser or rule name).
    pub stage: Cow<'static, str>,

    /// Field the stage was registered on.
    pub field: String,

    /// Detail reported by the stage.
    pub message: String,

    /// Enclosing nested fields, outermost first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<String>,
}

impl ValidationError {
    /// Creates a new top-level field error.
    pub fn new(
        stage: impl Into<Cow<'static, str>>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            stage: stage.into(),
            field: field.into(),
            message: message.into(),
            path: Vec::new(),
        }
    }

    /// Attributes this error to a nested class stored in `field`.
    #[must_use = "builder methods must be chained or built"]
    pub fn nested_in(mut self, field: impl Into<String>) -> Self {
        self.path.insert(0, field.into());
        self
    }

    /// Returns true if the error originated inside a nested class.
    #[must_use]
    pub fn is_nested(&self) -> bool {
        !self.path.is_empty()
    }

    /// Dotted path to the failing field, e.g. `user.address.zip`.
    #[must_use]
    pub fn field_path(&self) -> String {
        let mut path = self.path.join(".");
        if !path.is_empty() {
            path.push('.');
        }
        path.push_str(&self.field);
        path
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outer in &self.path {
            write!(f, "{NESTED_STAGE}({outer}): ")?;
        }
        write!(f, "{}({}): {}", self.stage, self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// ERROR COLLECTION
// ============================================================================

/// Ordered list of field failures returned by a failed validation.
///
/// Serializes as a list of rendered messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Creates a new empty error collection.
    #[must_use]
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Adds an error to the collection.
    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns the number of errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns all errors.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Iterates over the errors in report order.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Renders every error to its message string.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// Converts to a Result.
    #[must_use = "result must be used"]
    pub fn into_result<T>(self, ok_value: T) -> Outcome<T> {
        if self.is_empty() {
            Ok(ok_value)
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl Extend<ValidationError> for ValidationErrors {
    fn extend<I: IntoIterator<Item = ValidationError>>(&mut self, iter: I) {
        self.errors.extend(iter);
    }
}

impl FromIterator<ValidationError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.errors.iter().map(ToString::to_string))
    }
}

// ============================================================================
// USAGE ERROR
// ============================================================================

/// Misuse of the validation API.
///
/// Usage errors are never mixed into [`ValidationErrors`]: they abort the call
/// before any field is inspected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
    /// The input handed to the engine is not a JSON object.
    #[error("cannot validate `{class}`: expected a JSON object, got {found}")]
    NotAnObject {
        /// Class the caller asked for
        class: &'static str,
        /// Kind of JSON value that was supplied
        found: &'static str,
    },

    /// The class has no registered validation pipeline.
    #[error("class `{class}` declares no validation; register it before validating")]
    Unregistered {
        /// Class the caller asked for
        class: &'static str,
    },
}

// ============================================================================
// TESTS
// ============================================================================
