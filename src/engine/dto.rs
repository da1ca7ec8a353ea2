use crate::error::DtoError;
use crate::schema::{DataTransferObject, TypeDescriptor};
use crate::value::{map_to_json, serialize_map, FromValue, Map, Value};
use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;
use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

/// A constructed DTO instance.
///
/// Holds the raw input exactly as given, its normalized form, and the
/// converted field values keyed by property name in declaration order. Only
/// the fields take part in serialization and equality.
#[derive(Clone)]
pub struct Dto {
    descriptor: Arc<TypeDescriptor>,
    raw: Map,
    normalized: Map,
    fields: Map,
}

impl Dto {
    pub(crate) fn new(
        descriptor: Arc<TypeDescriptor>,
        raw: Map,
        normalized: Map,
        fields: Map,
    ) -> Self {
        Self {
            descriptor,
            raw,
            normalized,
            fields,
        }
    }

    /// Input map as passed to construction.
    pub fn raw_data(&self) -> &Map {
        &self.raw
    }

    /// Input map after key normalization, without empty-string values.
    pub fn normalized(&self) -> &Map {
        &self.normalized
    }

    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    pub fn type_name(&self) -> &'static str {
        self.descriptor.name()
    }

    pub fn type_id(&self) -> TypeId {
        self.descriptor.type_id()
    }

    /// Whether this instance was constructed as `T`.
    pub fn is<T: DataTransferObject>(&self) -> bool {
        self.type_id() == TypeId::of::<T>()
    }

    /// Converted value of a mapped property.
    pub fn get(&self, property: &str) -> Option<&Value> {
        self.fields.get(property)
    }

    /// Typed read of a property; `None` when absent or of another type.
    pub fn value<T: FromValue>(&self, property: &str) -> Option<T> {
        self.get(property).and_then(T::from_value)
    }

    /// Nested DTO held by `property`.
    pub fn nested(&self, property: &str) -> Option<&Dto> {
        self.get(property).and_then(Value::as_dto)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Property values in declaration order, nested DTOs flattened to maps.
    pub fn to_array(&self) -> Map {
        self.descriptor
            .properties()
            .iter()
            .filter_map(|property| {
                let value = self.fields.get(property.name())?;
                let value = match value {
                    Value::Dto(nested) => Value::Map(nested.to_array()),
                    other => other.clone(),
                };
                Some((property.name().to_string(), value))
            })
            .collect()
    }

    pub fn to_json(&self) -> JsonValue {
        map_to_json(&self.to_array())
    }

    /// Deserialize the serialized form into a plain serde type.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, DtoError> {
        serde_json::from_value(self.to_json()).map_err(|e| DtoError::Decode {
            target: std::any::type_name::<T>(),
            message: e.to_string(),
        })
    }
}

impl PartialEq for Dto {
    fn eq(&self, other: &Self) -> bool {
        self.type_id() == other.type_id() && self.fields == other.fields
    }
}

impl fmt::Debug for Dto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(self.type_name())
            .field("fields", &self.fields)
            .finish()
    }
}

impl Serialize for Dto {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_map(&self.to_array(), serializer)
    }
}
