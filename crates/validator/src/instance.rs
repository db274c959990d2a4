//! Validated output instances
//!
//! An [`Instance`] is what the engine builds once every field of a class has
//! passed its pipeline. It is created fresh from the final field values and
//! never goes through any constructor of the class it represents.

use crate::registry::ClassRef;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

/// Final value of one field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A (possibly parsed) JSON value
    Json(Value),
    /// The result of nested class validation
    Nested(Instance),
}

impl FieldValue {
    /// The JSON value, if this is not a nested instance.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Nested(_) => None,
        }
    }

    /// The nested instance, if any.
    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            Self::Nested(instance) => Some(instance),
            Self::Json(_) => None,
        }
    }

    /// Converts to plain JSON.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Json(value) => value.clone(),
            Self::Nested(instance) => instance.to_value(),
        }
    }

    fn into_value(self) -> Value {
        match self {
            Self::Json(value) => value,
            Self::Nested(instance) => instance.into_value(),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Json(value) => value.serialize(serializer),
            Self::Nested(instance) => instance.serialize(serializer),
        }
    }
}

/// A validated object of a registered class.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    class: ClassRef,
    fields: IndexMap<String, FieldValue>,
}

impl Instance {
    /// Builds an instance from final field values without running any class
    /// constructor.
    pub(crate) fn from_validated_fields(
        class: ClassRef,
        fields: IndexMap<String, FieldValue>,
    ) -> Self {
        Self { class, fields }
    }

    /// The class this instance belongs to.
    pub fn class(&self) -> ClassRef {
        self.class
    }

    /// Returns true if this is an instance of the Rust type `T`.
    pub fn is_instance_of<T: ?Sized + 'static>(&self) -> bool {
        self.class.is::<T>()
    }

    /// Field value, or `None` if the field is absent.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Returns true if the field is present.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of present fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no field is present.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over present fields.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Converts to a plain JSON object.
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(name, value)| (name.clone(), value.to_value()))
                .collect::<Map<_, _>>(),
        )
    }

    /// Converts to a plain JSON object, consuming the instance.
    pub fn into_value(self) -> Value {
        Value::Object(
            self.fields
                .into_iter()
                .map(|(name, value)| (name, value.into_value()))
                .collect::<Map<_, _>>(),
        )
    }

    /// Deserializes the instance into `T`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.to_value())
    }
}

impl Serialize for Instance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
