//! Macros for declaring reusable rules with minimal boilerplate.
//!
//! # Examples
//!
//! ```rust,ignore
//! use tessera_validator::rule;
//! use tessera_validator::foundation::Check;
//!
//! // Unit rule (no fields)
//! rule! {
//!     pub NotBlank = "not-blank";
//!     check(value) {
//!         let blank = value.and_then(|v| v.as_str()).is_some_and(|s| s.trim().is_empty());
//!         Check::ensure(!blank, "must not be blank")
//!     }
//!     fn not_blank();
//! }
//!
//! // Rule with configuration
//! rule! {
//!     #[derive(Copy, PartialEq)]
//!     pub AtLeast { min: f64 } = "at-least";
//!     check(self, value) {
//!         let n = value.and_then(|v| v.as_f64());
//!         Check::ensure(n.is_none_or(|n| n >= self.min), format!("must be at least {}", self.min))
//!     }
//!     fn at_least(min: f64);
//! }
//! ```

// ============================================================================
// RULE MACRO
// ============================================================================

/// Declares a rule: struct definition, [`Rule`](crate::foundation::Rule)
/// implementation, constructor, and factory function.
///
/// The string after `=` is the stage name used in error messages. The
/// `check` block sees the field value as `Option<&Value>` and returns
/// anything convertible into [`Check`](crate::foundation::Check).
///
/// `#[derive(Debug, Clone)]` is always applied. Add extra derives via
/// `#[derive(...)]`.
///
/// # Variants
///
/// **Unit rule**:
/// ```rust,ignore
/// rule! {
///     pub Present = "present";
///     check(value) { Check::ensure(value.is_some(), "is required") }
///     fn present();
/// }
/// ```
///
/// **Struct with fields** (auto `new` from all fields):
/// ```rust,ignore
/// rule! {
///     pub MinLength { min: usize } = "min-length";
///     check(self, value) { ... }
///     fn min_length(min: usize);
/// }
/// ```
///
/// **Fallible constructor** (the type after `->` is the error type):
/// ```rust,ignore
/// rule! {
///     pub Pattern { regex: Regex } = "pattern";
///     check(self, value) { ... }
///     new(pattern: &str) -> regex::Error { Ok(Self { regex: Regex::new(pattern)? }) }
///     fn pattern(pattern: &str) -> regex::Error;
/// }
/// ```
#[macro_export]
macro_rules! rule {
    // ── Unit rule + factory fn ─────────────────────────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident = $stage:literal;
        check($inp:ident) $body:block
        fn $factory:ident();
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis struct $name;

        impl $crate::foundation::Rule for $name {
            fn name(&self) -> ::std::borrow::Cow<'static, str> {
                ::std::borrow::Cow::Borrowed($stage)
            }

            #[allow(unused_variables)]
            fn check(&self, $inp: Option<&$crate::Value>) -> $crate::foundation::Check {
                ::core::convert::Into::into($body)
            }
        }

        #[must_use]
        $vis const fn $factory() -> $name { $name }
    };

    // ── Struct with fields + auto new + factory fn ─────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? } = $stage:literal;
        check($self_:ident, $inp:ident) $body:block
        fn $factory:ident($($farg:ident: $faty:ty),* $(,)?);
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            $(pub $field: $fty,)+
        }

        impl $name {
            #[must_use]
            pub fn new($($field: $fty),+) -> Self {
                Self { $($field),+ }
            }
        }

        impl $crate::foundation::Rule for $name {
            fn name(&self) -> ::std::borrow::Cow<'static, str> {
                ::std::borrow::Cow::Borrowed($stage)
            }

            #[allow(unused_variables)]
            fn check(&$self_, $inp: Option<&$crate::Value>) -> $crate::foundation::Check {
                ::core::convert::Into::into($body)
            }
        }

        #[must_use]
        $vis fn $factory($($farg: $faty),*) -> $name {
            $name::new($($farg),*)
        }
    };

    // ── Struct with fields + fallible new + fallible factory fn ────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? } = $stage:literal;
        check($self_:ident, $inp:ident) $body:block
        new($($narg:ident: $naty:ty),* $(,)?) -> $ety:ty $new_body:block
        fn $factory:ident($($farg:ident: $faty:ty),* $(,)?) -> $fety:ty;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            $(pub $field: $fty,)+
        }

        impl $name {
            /// # Errors
            ///
            /// Returns an error if the rule configuration is invalid.
            pub fn new($($narg: $naty),*) -> ::core::result::Result<Self, $ety> $new_body
        }

        impl $crate::foundation::Rule for $name {
            fn name(&self) -> ::std::borrow::Cow<'static, str> {
                ::std::borrow::Cow::Borrowed($stage)
            }

            #[allow(unused_variables)]
            fn check(&$self_, $inp: Option<&$crate::Value>) -> $crate::foundation::Check {
                ::core::convert::Into::into($body)
            }
        }

        /// # Errors
        ///
        /// Returns an error if the rule configuration is invalid.
        $vis fn $factory($($farg: $faty),*) -> ::core::result::Result<$name, $fety> {
            $name::new($($farg),*)
        }
    };
}
