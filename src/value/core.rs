use crate::engine::Dto;
use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Value as JsonValue;
use std::sync::Arc;

use super::{Collection, Fluent};

/// Insertion-ordered associative container used for all input and output maps.
pub type Map = indexmap::IndexMap<String, Value>;

/// Dynamic value flowing through the mapping engine.
///
/// Raw input, normalized input and converted field values all share this type.
/// Containers (`List`, `Map`) together form the nominal `array` type; the
/// remaining variants each carry their own nominal name (see [`Value::type_name`]).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(Map),
    Collection(Collection),
    Date(DateTime<FixedOffset>),
    Fluent(Fluent),
    /// An already constructed DTO instance
    Dto(Arc<Dto>),
    /// Result of a user-defined converter, checked against `TypeKind::Tagged`
    Tagged(Tagged),
}

/// A value labelled with a user-defined nominal type.
#[derive(Debug, Clone, PartialEq)]
pub struct Tagged {
    tag: &'static str,
    value: Box<Value>,
}

impl Tagged {
    pub fn new(tag: &'static str, value: impl Into<Value>) -> Self {
        Self {
            tag,
            value: Box::new(value.into()),
        }
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn inner(&self) -> &Value {
        &self.value
    }

    pub fn into_inner(self) -> Value {
        *self.value
    }
}

impl Value {
    /// Nominal runtime type name, compared against declared property types.
    pub fn type_name(&self) -> &str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) | Value::Map(_) => "array",
            Value::Collection(_) => "Collection",
            Value::Date(_) => "Date",
            Value::Fluent(_) => "Fluent",
            Value::Dto(dto) => dto.type_name(),
            Value::Tagged(tagged) => tagged.tag(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Null, whitespace-only text and empty containers.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            Value::List(items) => items.is_empty(),
            Value::Map(map) => map.is_empty(),
            Value::Collection(c) => c.is_empty(),
            _ => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_dto(&self) -> Option<&Dto> {
        match self {
            Value::Dto(dto) => Some(dto),
            _ => None,
        }
    }

    /// Plain JSON rendering; nested DTOs are rendered through `to_array`.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Int(i) => JsonValue::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Value::String(s) => JsonValue::String(s.clone()),
            Value::List(items) => JsonValue::Array(items.iter().map(Value::to_json).collect()),
            Value::Map(map) => map_to_json(map),
            Value::Collection(c) => c.to_value().to_json(),
            Value::Date(d) => JsonValue::String(d.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Value::Fluent(f) => map_to_json(f.attributes()),
            Value::Dto(dto) => dto.to_json(),
            Value::Tagged(t) => t.inner().to_json(),
        }
    }
}

pub(crate) fn map_to_json(map: &Map) -> JsonValue {
    JsonValue::Object(
        map.iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect(),
    )
}

impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(0.0)),
            },
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            JsonValue::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Map(value)
    }
}

impl From<Dto> for Value {
    fn from(value: Dto) -> Self {
        Value::Dto(Arc::new(value))
    }
}

impl From<Arc<Dto>> for Value {
    fn from(value: Arc<Dto>) -> Self {
        Value::Dto(value)
    }
}

impl From<Tagged> for Value {
    fn from(value: Tagged) -> Self {
        Value::Tagged(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(map) => serialize_map(map, serializer),
            Value::Collection(c) => c.to_value().serialize(serializer),
            Value::Date(d) => {
                serializer.serialize_str(&d.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            Value::Fluent(f) => serialize_map(f.attributes(), serializer),
            Value::Dto(dto) => dto.serialize(serializer),
            Value::Tagged(t) => t.inner().serialize(serializer),
        }
    }
}

pub(crate) fn serialize_map<S: Serializer>(map: &Map, serializer: S) -> Result<S::Ok, S::Error> {
    let mut out = serializer.serialize_map(Some(map.len()))?;
    for (k, v) in map {
        out.serialize_entry(k, v)?;
    }
    out.end()
}

/// Typed extraction from a converted [`Value`].
///
/// Extraction is exact: an `Int` is not read back as `f64`.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl FromValue for Map {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_map().cloned()
    }
}

impl FromValue for Vec<Value> {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::List(items) => Some(items.clone()),
            _ => None,
        }
    }
}

impl FromValue for DateTime<FixedOffset> {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }
}

impl FromValue for Collection {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Collection(c) => Some(c.clone()),
            _ => None,
        }
    }
}

impl FromValue for Fluent {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Fluent(f) => Some(f.clone()),
            _ => None,
        }
    }
}

impl FromValue for Arc<Dto> {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Dto(dto) => Some(Arc::clone(dto)),
            _ => None,
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            other => T::from_value(other).map(Some),
        }
    }
}
