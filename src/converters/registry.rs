use super::{
    ArrayConverter, BooleanConverter, CollectionConverter, ConverterKind, ConverterSpec,
    CustomConverter, DateConverter, DtoReferenceConverter, DynamicConverter, FloatConverter,
    FluentConverter, IntConverter, StringConverter, TypeConverter,
};
use crate::error::DtoError;
use crate::runtime_config::DtoConfig;
use crate::schema::{DtoRef, Property, TypeKind};
use crate::value::Value;
use dashmap::DashMap;
use std::any::TypeId;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Resolves converter specifiers to shared converter instances.
///
/// Every cache lives for as long as the registry: one instance per built-in
/// kind, per user converter type, per registered name and per nested DTO
/// target. All maps are concurrent so constructions on different threads can
/// populate them lazily.
pub struct ConverterRegistry {
    builtins: DashMap<ConverterKind, Arc<dyn TypeConverter>>,
    custom: DashMap<TypeId, Arc<dyn TypeConverter>>,
    named: DashMap<String, Arc<dyn TypeConverter>>,
    nested: DashMap<TypeId, Arc<dyn TypeConverter>>,
    truthy: Vec<Value>,
    strict_numbers: bool,
    date: DateConverter,
}

impl ConverterRegistry {
    pub fn new(config: &DtoConfig) -> Self {
        Self {
            builtins: DashMap::new(),
            custom: DashMap::new(),
            named: DashMap::new(),
            nested: DashMap::new(),
            truthy: config.boolean_tokens(),
            strict_numbers: config.strict_numbers,
            date: DateConverter::new(config.default_offset()),
        }
    }

    /// Register a user converter addressable by `ConverterSpec::Named(name)`.
    /// Registering the same name again replaces the previous converter, and a
    /// registered name shadows the built-in kind of the same name.
    pub fn register(&self, name: impl Into<String>, converter: Arc<dyn TypeConverter>) {
        let name = name.into();
        debug!(converter = %name, "Registered named converter");
        self.named.insert(name, converter);
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.named.contains_key(name)
    }

    /// Converter for `spec`.
    ///
    /// `ConverterSpec::Dto` carries no target on its own and is rejected here;
    /// resolve it with [`resolve_dto_reference`](Self::resolve_dto_reference).
    pub fn resolve(&self, spec: &ConverterSpec) -> Result<Arc<dyn TypeConverter>, DtoError> {
        match spec {
            ConverterSpec::Kind(kind) => Ok(self.builtin(*kind)),
            ConverterSpec::Custom(custom) => Ok(self.custom(custom)),
            ConverterSpec::Named(name) => Ok(self.named(name)),
            ConverterSpec::Dto => Err(DtoError::UnsupportedConversionTarget {
                property: None,
                target: "unspecified".to_string(),
                actual: "dto".to_string(),
            }),
        }
    }

    /// Cached nested-DTO converter for `target`.
    pub fn resolve_dto_reference(&self, target: DtoRef) -> Arc<dyn TypeConverter> {
        Arc::clone(
            self.nested
                .entry(target.type_id())
                .or_insert_with(|| Arc::new(DtoReferenceConverter::new(target)))
                .value(),
        )
    }

    /// Converter for a mapped property, binding the nested-DTO marker to the
    /// property's declared type.
    pub(crate) fn resolve_for(&self, property: &Property) -> Result<Arc<dyn TypeConverter>, DtoError> {
        let spec = property.field().map(|f| f.converter()).cloned().unwrap_or_default();
        match spec {
            ConverterSpec::Dto => match property.declared().kind() {
                TypeKind::Dto(target) => Ok(self.resolve_dto_reference(target)),
                other => Err(DtoError::UnsupportedConversionTarget {
                    property: Some(property.name()),
                    target: other.name().to_string(),
                    actual: "dto marker".to_string(),
                }),
            },
            spec => self.resolve(&spec),
        }
    }

    fn builtin(&self, kind: ConverterKind) -> Arc<dyn TypeConverter> {
        if let Some(existing) = self.builtins.get(&kind) {
            return Arc::clone(existing.value());
        }
        let converter: Arc<dyn TypeConverter> = match kind {
            ConverterKind::String => Arc::new(StringConverter),
            ConverterKind::Int => Arc::new(IntConverter::new(self.strict_numbers)),
            ConverterKind::Float => Arc::new(FloatConverter::new(self.strict_numbers)),
            ConverterKind::Boolean => Arc::new(BooleanConverter::new(self.truthy.clone())),
            ConverterKind::Array => Arc::new(ArrayConverter),
            ConverterKind::Collection => Arc::new(CollectionConverter),
            ConverterKind::Date => Arc::new(self.date),
            ConverterKind::Fluent => Arc::new(FluentConverter),
            ConverterKind::Dynamic | ConverterKind::Enum => Arc::new(DynamicConverter),
        };
        Arc::clone(self.builtins.entry(kind).or_insert(converter).value())
    }

    fn custom(&self, custom: &CustomConverter) -> Arc<dyn TypeConverter> {
        Arc::clone(
            self.custom
                .entry(custom.type_id())
                .or_insert_with(|| {
                    debug!(converter = custom.name(), "Instantiated user converter");
                    custom.instantiate()
                })
                .value(),
        )
    }

    fn named(&self, name: &str) -> Arc<dyn TypeConverter> {
        if let Some(converter) = self.named.get(name) {
            return Arc::clone(converter.value());
        }
        if let Some(kind) = ConverterKind::parse(name) {
            return self.builtin(kind);
        }
        warn!(converter = name, "Unknown converter name, falling back to dynamic");
        self.builtin(ConverterKind::Dynamic)
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::new(&DtoConfig::default())
    }
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterRegistry")
            .field("builtins", &self.builtins.len())
            .field("custom", &self.custom.len())
            .field("named", &self.named.len())
            .field("nested", &self.nested.len())
            .field("strict_numbers", &self.strict_numbers)
            .finish()
    }
}
