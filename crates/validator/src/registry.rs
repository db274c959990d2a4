//! Pipeline registry
//!
//! Maps class identity to the per-field pipelines registered for it.
//!
//! # Lifecycle
//!
//! The registry has two phases. During registration (program start-up)
//! builders append parsers, rules and presence flags. Afterwards it is only
//! read by the engine. Registration for a class must complete before any
//! validation references that class; this is a precondition of the API and is
//! not checked at runtime.
//!
//! Lookups return `Arc` snapshots, so the engine never holds the lock while
//! it recurses into nested classes. Registration updates entries
//! copy-on-write.

use crate::design_type::DeclaredType;
use crate::pipeline::{ClassBuilder, ParserStage, RuleStage};
use indexmap::IndexMap;
use parking_lot::{ReentrantMutex, ReentrantMutexGuard, RwLock};
use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, LazyLock};
use tracing::debug;

// ============================================================================
// CLASS IDENTITY
// ============================================================================

/// Identity of a class: a Rust type plus the name used in messages.
///
/// Equality and hashing use the type only.
#[derive(Clone, Copy)]
pub struct ClassRef {
    id: TypeId,
    name: &'static str,
}

impl ClassRef {
    /// Class identity of `T`, named after the last path segment of its type
    /// name (`app::model::Person` becomes `Person`).
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: short_type_name(std::any::type_name::<T>()),
        }
    }

    /// Class identity of `T` with an explicit display name.
    pub fn named<T: ?Sized + 'static>(name: &'static str) -> Self {
        Self {
            id: TypeId::of::<T>(),
            name,
        }
    }

    /// Type identity.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns true if this is the identity of `T`.
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

impl PartialEq for ClassRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ClassRef {}

impl Hash for ClassRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassRef({})", self.name)
    }
}

impl fmt::Display for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

// ============================================================================
// FIELD PIPELINE CONTEXT
// ============================================================================

/// Everything registered for one field of a class.
#[derive(Debug, Clone)]
pub struct FieldPipelineContext {
    declared_type: DeclaredType,
    parsers: Vec<ParserStage>,
    rules: Vec<RuleStage>,
    allow_null: bool,
    allow_undefined: bool,
}

impl FieldPipelineContext {
    fn new(declared_type: DeclaredType) -> Self {
        Self {
            declared_type,
            parsers: Vec::new(),
            rules: Vec::new(),
            allow_null: false,
            allow_undefined: false,
        }
    }

    /// The type the field was declared with.
    pub fn declared_type(&self) -> DeclaredType {
        self.declared_type
    }

    /// Parsers in registration order.
    pub fn parsers(&self) -> &[ParserStage] {
        &self.parsers
    }

    /// Rules in registration order.
    pub fn rules(&self) -> &[RuleStage] {
        &self.rules
    }

    /// Whether `null` skips rules and nested validation.
    pub fn allow_null(&self) -> bool {
        self.allow_null
    }

    /// Whether an undefined value skips rules and nested validation.
    pub fn allow_undefined(&self) -> bool {
        self.allow_undefined
    }

    pub(crate) fn push_parser(&mut self, parser: ParserStage) {
        self.parsers.push(parser);
    }

    pub(crate) fn push_rule(&mut self, rule: RuleStage) {
        self.rules.push(rule);
    }

    pub(crate) fn set_allow_null(&mut self) {
        self.allow_null = true;
    }

    pub(crate) fn set_allow_undefined(&mut self) {
        self.allow_undefined = true;
    }
}

// ============================================================================
// CLASS PIPELINE CONTEXT
// ============================================================================

/// Field pipelines of one class, in field registration order.
#[derive(Debug, Clone)]
pub struct ClassPipelineContext {
    class: ClassRef,
    fields: IndexMap<String, FieldPipelineContext>,
}

impl ClassPipelineContext {
    fn new(class: ClassRef) -> Self {
        Self {
            class,
            fields: IndexMap::new(),
        }
    }

    /// The class this context describes.
    pub fn class(&self) -> ClassRef {
        self.class
    }

    /// Looks up a field pipeline.
    pub fn field(&self, name: &str) -> Option<&FieldPipelineContext> {
        self.fields.get(name)
    }

    /// Returns true if any registration targeted `name`.
    pub fn contains_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Iterates over field pipelines in registration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldPipelineContext)> {
        self.fields.iter().map(|(name, field)| (name.as_str(), field))
    }

    /// Field names in registration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of fields with registrations.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no field has registrations.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the field pipeline, creating it with `declared_type` if this
    /// is the first registration for the field. An existing declared type is
    /// kept.
    pub(crate) fn declare_field(
        &mut self,
        name: &str,
        declared_type: DeclaredType,
    ) -> &mut FieldPipelineContext {
        if !self.fields.contains_key(name) {
            debug!(class = %self.class, field = name, declared_type = %declared_type, "declaring field");
        }
        self.fields
            .entry(name.to_owned())
            .or_insert_with(|| FieldPipelineContext::new(declared_type))
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

static GLOBAL: LazyLock<PipelineRegistry> = LazyLock::new(PipelineRegistry::new);

/// Registry of class pipelines.
///
/// Most programs use the process-wide instance from [`PipelineRegistry::global`];
/// independent registries are useful for tests and for embedding several
/// validation domains in one process.
///
/// # Examples
///
/// ```rust,ignore
/// use tessera_validator::prelude::*;
///
/// struct Person;
///
/// let registry = PipelineRegistry::new();
/// let person = registry.class_of::<Person>();
/// person.field("name", DeclaredType::String).type_checked();
/// person.field("age", DeclaredType::Number).type_checked().optional();
///
/// assert!(registry.contains(ClassRef::of::<Person>()));
/// ```
pub struct PipelineRegistry {
    classes: RwLock<HashMap<ClassRef, Arc<ClassPipelineContext>>>,
    /// Serializes typed registration. Reentrant because describing a class
    /// registers its nested classes on the same thread.
    registration: ReentrantMutex<()>,
}

impl Default for PipelineRegistry {
    fn default() -> Self {
        Self {
            classes: RwLock::new(HashMap::new()),
            registration: ReentrantMutex::new(()),
        }
    }
}

impl PipelineRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Starts (or continues) registration for `class`.
    ///
    /// Creates an empty context for the class if none exists yet.
    pub fn class(&self, class: ClassRef) -> ClassBuilder<'_> {
        ClassBuilder::new(self, class)
    }

    /// Starts (or continues) registration for the Rust type `T`.
    pub fn class_of<T: ?Sized + 'static>(&self) -> ClassBuilder<'_> {
        self.class(ClassRef::of::<T>())
    }

    /// Returns the context for `class`, creating an empty one if needed.
    pub fn get_or_create_class_context(&self, class: ClassRef) -> Arc<ClassPipelineContext> {
        if let Some(context) = self.class_context(class) {
            return context;
        }
        Arc::clone(self.classes.write().entry(class).or_insert_with(|| {
            debug!(class = %class, "creating class pipeline context");
            Arc::new(ClassPipelineContext::new(class))
        }))
    }

    /// Returns the context for `class`, or `None` if the class declares no
    /// validation.
    pub fn class_context(&self, class: ClassRef) -> Option<Arc<ClassPipelineContext>> {
        self.classes.read().get(&class).cloned()
    }

    /// Returns true if `class` has a context.
    pub fn contains(&self, class: ClassRef) -> bool {
        self.classes.read().contains_key(&class)
    }

    /// All registered classes, in no particular order.
    pub fn classes(&self) -> Vec<ClassRef> {
        self.classes.read().keys().copied().collect()
    }

    /// Number of registered classes.
    pub fn len(&self) -> usize {
        self.classes.read().len()
    }

    /// Returns true if no class is registered.
    pub fn is_empty(&self) -> bool {
        self.classes.read().is_empty()
    }

    /// Removes every class. Meant for test isolation; contexts already
    /// handed out stay valid.
    pub fn clear(&self) {
        self.classes.write().clear();
    }

    /// Held for the whole of a typed registration, so other threads never
    /// observe a class whose `describe` is still running.
    pub(crate) fn lock_registration(&self) -> ReentrantMutexGuard<'_, ()> {
        self.registration.lock()
    }

    /// Applies `update` to the context of `class`, creating it if needed.
    pub(crate) fn update<R>(
        &self,
        class: ClassRef,
        update: impl FnOnce(&mut ClassPipelineContext) -> R,
    ) -> R {
        let mut classes = self.classes.write();
        let entry = classes.entry(class).or_insert_with(|| {
            debug!(class = %class, "creating class pipeline context");
            Arc::new(ClassPipelineContext::new(class))
        });
        update(Arc::make_mut(entry))
    }
}

impl fmt::Debug for PipelineRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let classes = self.classes.read();
        f.debug_struct("PipelineRegistry")
            .field("classes", &classes.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Person;
    struct Address;

    mod nested {
        pub struct Wrapper<T>(pub T);
    }

    #[test]
    fn class_ref_names() {
        assert_eq!(ClassRef::of::<Person>().name(), "Person");
        assert_eq!(ClassRef::of::<nested::Wrapper<Person>>().name(), "Wrapper");
        assert_eq!(ClassRef::named::<Person>("Human").name(), "Human");
        assert_eq!(ClassRef::named::<Person>("Human"), ClassRef::of::<Person>());
        assert!(ClassRef::of::<Person>().is::<Person>());
        assert_ne!(ClassRef::of::<Person>(), ClassRef::of::<Address>());
    }

    #[test]
    fn get_or_create_is_idempotent() {
        let registry = PipelineRegistry::new();
        let class = ClassRef::of::<Person>();

        assert!(registry.class_context(class).is_none());
        let first = registry.get_or_create_class_context(class);
        let second = registry.get_or_create_class_context(class);

        assert!(Arc::ptr_eq(&first, &second));
        assert!(first.is_empty());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn empty_context_is_distinct_from_absent() {
        let registry = PipelineRegistry::new();
        registry.class_of::<Person>();

        assert!(registry.contains(ClassRef::of::<Person>()));
        assert!(!registry.contains(ClassRef::of::<Address>()));
        assert!(
            registry
                .class_context(ClassRef::of::<Person>())
                .is_some_and(|context| context.is_empty())
        );
    }

    #[test]
    fn declare_field_keeps_first_type_and_order() {
        let registry = PipelineRegistry::new();
        let class = ClassRef::of::<Person>();
        registry.update(class, |context| {
            context.declare_field("name", DeclaredType::String);
            context.declare_field("age", DeclaredType::Number);
            context.declare_field("name", DeclaredType::Boolean);
        });

        let context = registry.get_or_create_class_context(class);
        assert_eq!(context.field_names().collect::<Vec<_>>(), vec!["name", "age"]);
        assert_eq!(
            context.field("name").map(FieldPipelineContext::declared_type),
            Some(DeclaredType::String)
        );
    }

    #[test]
    fn snapshots_survive_later_registration() {
        let registry = PipelineRegistry::new();
        let class = ClassRef::of::<Person>();
        let before = registry.get_or_create_class_context(class);

        registry.update(class, |context| {
            context.declare_field("name", DeclaredType::String);
        });

        assert!(before.is_empty());
        assert_eq!(registry.get_or_create_class_context(class).len(), 1);
    }

    #[test]
    fn clear_removes_everything() {
        let registry = PipelineRegistry::new();
        registry.class_of::<Person>();
        registry.class_of::<Address>();
        assert_eq!(registry.classes().len(), 2);

        registry.clear();
        assert!(registry.is_empty());
    }
}
