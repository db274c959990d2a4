//! Typed classes
//!
//! [`Validated`] ties a Rust type to the pipeline describing it. The type is
//! built from validated data through `serde::Deserialize`, so none of its own
//! constructors run.
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
//!         class.field("age", DeclaredType::Number).type_checked();
//!     }
//! }
//!
//! register::<Person>();
//! let person = create_validated::<Person>(&json!({"name": "Test", "age": -1}))??;
//! ```

use crate::pipeline::ClassBuilder;
use crate::registry::{ClassRef, PipelineRegistry};
use serde::de::DeserializeOwned;
use tracing::debug;

/// A Rust type whose instances are produced by validation.
pub trait Validated: DeserializeOwned + 'static {
    /// Registers the field pipelines of this type.
    ///
    /// Called once per registry by [`PipelineRegistry::register`].
    fn describe(class: &ClassBuilder<'_>);

    /// Class identity of this type.
    ///
    /// Overrides may change the display name (see [`ClassRef::named`]) but
    /// must keep the identity of `Self`; registration only takes the name
    /// from the returned value.
    fn class_ref() -> ClassRef {
        ClassRef::of::<Self>()
    }
}

impl PipelineRegistry {
    /// Registers `T` by running [`Validated::describe`], unless the class
    /// already has a context in this registry.
    ///
    /// Concurrent calls for the same type wait until the first one has
    /// finished describing it.
    pub fn register<T: Validated>(&self) -> ClassRef {
        let class = ClassRef::named::<T>(T::class_ref().name());
        let _registering = self.lock_registration();
        if self.contains(class) {
            return class;
        }
        debug!(class = %class, "registering validated class");
        T::describe(&self.class(class));
        class
    }
}

/// Registers `T` in the global registry.
pub fn register<T: Validated>() -> ClassRef {
    PipelineRegistry::global().register::<T>()
}
