//! Rule results.

use std::borrow::Cow;

/// Result of running a single rule against a field value.
///
/// A `Fail` with an empty message counts as a pass, so rules that build
/// their message conditionally never need a separate branch for "no error".
///
/// # Examples
///
/// ```rust,ignore
/// use tessera_validator::foundation::Check;
///
/// let adult = |age: f64| Check::ensure(age > 18.0, "Min Age 18");
/// assert!(adult(30.0).is_pass());
/// assert_eq!(adult(12.0).message(), Some("Min Age 18"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Check {
    /// The value satisfies the rule.
    #[default]
    Pass,
    /// The value violates the rule; the message describes why.
    Fail(Cow<'static, str>),
}

impl Check {
    /// Creates a failing result.
    pub fn fail(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Fail(message.into())
    }

    /// Passes when `condition` holds, fails with `message` otherwise.
    pub fn ensure(condition: bool, message: impl Into<Cow<'static, str>>) -> Self {
        if condition {
            Self::Pass
        } else {
            Self::fail(message)
        }
    }

    /// Returns `true` if no error is reported.
    #[must_use]
    pub fn is_pass(&self) -> bool {
        self.message().is_none()
    }

    /// Returns the failure message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Fail(message) if !message.is_empty() => Some(message.as_ref()),
            _ => None,
        }
    }

    /// Consumes the result and returns the failure message, if any.
    #[must_use]
    pub fn into_message(self) -> Option<Cow<'static, str>> {
        match self {
            Self::Fail(message) if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

impl<S> From<Option<S>> for Check
where
    S: Into<Cow<'static, str>>,
{
    fn from(message: Option<S>) -> Self {
        match message {
            Some(message) => Self::fail(message),
            None => Self::Pass,
        }
    }
}

impl<S> From<Result<(), S>> for Check
where
    S: Into<Cow<'static, str>>,
{
    fn from(result: Result<(), S>) -> Self {
        match result {
            Ok(()) => Self::Pass,
            Err(message) => Self::fail(message),
        }
    }
}
