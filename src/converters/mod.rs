//! # Converters Module
//!
//! Type converters turn one raw input value into one typed value. Every mapped
//! field names a [`ConverterSpec`]; the [`ConverterRegistry`] resolves it to a
//! shared converter instance.
//!
//! ## Built-in kinds
//!
//! | Kind | Result |
//! |------|--------|
//! | `Dynamic` | input unchanged |
//! | `String` | text form of a scalar, `null` stays `null` |
//! | `Int` / `Float` | lenient numeric parse, non-numeric text reads as zero |
//! | `Boolean` | membership in the configured true tokens |
//! | `Array` | decoded JSON text, or the input coerced to a container |
//! | `Collection` | [`Collection`](crate::value::Collection) view over a container |
//! | `Date` | parsed calendar date-time, blank input is `null` |
//! | `Fluent` | [`Fluent`](crate::value::Fluent) attribute bag, non-containers are `null` |
//! | `Enum` | no dedicated converter, behaves as `Dynamic` |
//!
//! ## User converters
//!
//! Implement [`TypeConverter`] and reference it either by type with
//! [`CustomConverter::of`] or by name after registering it with
//! [`ConverterRegistry::register`]. Converters are shared between threads and
//! must not keep per-call state.

mod builtin;
mod dto;
mod registry;

pub use builtin::{
    ArrayConverter, BooleanConverter, CollectionConverter, DateConverter, DynamicConverter,
    FloatConverter, FluentConverter, IntConverter, StringConverter,
};
pub use dto::DtoReferenceConverter;
pub use registry::ConverterRegistry;

use crate::engine::DtoEngine;
use crate::error::DtoError;
use crate::value::Value;
use std::any::{type_name, TypeId};
use std::fmt;
use std::sync::Arc;

/// Converts one raw value into one target-typed value.
pub trait TypeConverter: Send + Sync {
    /// Name used in conversion error messages
    fn name(&self) -> &str {
        "custom"
    }

    fn convert(&self, value: Value, cx: &ConvertContext<'_>) -> Result<Value, DtoError>;
}

/// What a converter may know about the conversion it is part of.
pub struct ConvertContext<'a> {
    engine: &'a DtoEngine,
    property: Option<&'static str>,
}

impl<'a> ConvertContext<'a> {
    pub fn new(engine: &'a DtoEngine, property: Option<&'static str>) -> Self {
        Self { engine, property }
    }

    /// Engine running the construction, for converters that build nested DTOs.
    pub fn engine(&self) -> &'a DtoEngine {
        self.engine
    }

    pub fn property(&self) -> Option<&'static str> {
        self.property
    }

    /// Conversion error attributed to the current property.
    pub fn error(&self, converter: &str, message: impl Into<String>) -> DtoError {
        DtoError::conversion(converter, self.property, message)
    }
}

/// Well-known converter kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConverterKind {
    Dynamic,
    String,
    Int,
    Float,
    Boolean,
    Array,
    Collection,
    Date,
    Enum,
    Fluent,
}

impl ConverterKind {
    pub const ALL: [ConverterKind; 10] = [
        ConverterKind::Dynamic,
        ConverterKind::String,
        ConverterKind::Int,
        ConverterKind::Float,
        ConverterKind::Boolean,
        ConverterKind::Array,
        ConverterKind::Collection,
        ConverterKind::Date,
        ConverterKind::Enum,
        ConverterKind::Fluent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConverterKind::Dynamic => "dynamic",
            ConverterKind::String => "string",
            ConverterKind::Int => "int",
            ConverterKind::Float => "float",
            ConverterKind::Boolean => "boolean",
            ConverterKind::Array => "array",
            ConverterKind::Collection => "collection",
            ConverterKind::Date => "date",
            ConverterKind::Enum => "enum",
            ConverterKind::Fluent => "fluent",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for ConverterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user converter type, instantiated once per registry.
#[derive(Clone, Copy)]
pub struct CustomConverter {
    type_id: TypeId,
    name: &'static str,
    factory: fn() -> Arc<dyn TypeConverter>,
}

fn instantiate<C: TypeConverter + Default + 'static>() -> Arc<dyn TypeConverter> {
    Arc::new(C::default())
}

impl CustomConverter {
    pub fn of<C: TypeConverter + Default + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<C>(),
            name: type_name::<C>(),
            factory: instantiate::<C>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub(crate) fn instantiate(&self) -> Arc<dyn TypeConverter> {
        (self.factory)()
    }
}

impl fmt::Debug for CustomConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CustomConverter").field(&self.name).finish()
    }
}

impl PartialEq for CustomConverter {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

/// Converter declared on a field.
#[derive(Debug, Clone, PartialEq)]
pub enum ConverterSpec {
    Kind(ConverterKind),
    Custom(CustomConverter),
    /// Converter registered under a name. An unregistered name that spells a
    /// built-in kind resolves to that kind; other unknown names behave as `Dynamic`
    Named(String),
    /// Nested DTO; the target is the property's declared DTO type
    Dto,
}

impl ConverterSpec {
    pub fn custom<C: TypeConverter + Default + 'static>() -> Self {
        ConverterSpec::Custom(CustomConverter::of::<C>())
    }

    pub fn named(name: impl Into<String>) -> Self {
        ConverterSpec::Named(name.into())
    }
}

impl Default for ConverterSpec {
    fn default() -> Self {
        ConverterSpec::Kind(ConverterKind::Dynamic)
    }
}

impl From<ConverterKind> for ConverterSpec {
    fn from(kind: ConverterKind) -> Self {
        ConverterSpec::Kind(kind)
    }
}
