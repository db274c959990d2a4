//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Default limit on nested class recursion.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Options for a [`Validator`](crate::engine::Validator).
///
/// Deserializable so it can live in an application's config file; missing
/// keys take their defaults.
///
/// ```rust,ignore
/// let config: ValidatorConfig = serde_json::from_value(json!({"max_depth": 8}))?;
/// assert!(config.copy_undeclared_fields);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Maximum depth of nested class validation. Exceeding it is reported as
    /// a `validate-nested-class` error on the field that would recurse.
    pub max_depth: usize,

    /// Copy input keys that no registration mentions onto the output
    /// instance, unread.
    pub copy_undeclared_fields: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            copy_undeclared_fields: true,
        }
    }
}

impl ValidatorConfig {
    /// Sets the nesting limit.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets whether undeclared input keys are carried over.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_copy_undeclared_fields(mut self, copy: bool) -> Self {
        self.copy_undeclared_fields = copy;
        self
    }
}
