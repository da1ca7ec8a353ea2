use super::dto::Dto;
use super::validate;
use crate::converters::{ConvertContext, ConverterRegistry, TypeConverter};
use crate::error::DtoError;
use crate::normalize::{normalize, normalize_map};
use crate::runtime_config::DtoConfig;
use crate::schema::{DataTransferObject, DescriptorCache, DtoRef, TypeDescriptor};
use crate::value::{Map, Value};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::debug;

/// Shared state behind every [`DtoEngine`] handle.
#[derive(Debug)]
pub struct DtoRegistry {
    config: DtoConfig,
    descriptors: DescriptorCache,
    converters: ConverterRegistry,
}

impl DtoRegistry {
    pub fn new(config: DtoConfig) -> Self {
        let descriptors = DescriptorCache::new(config.descriptor_cache_capacity);
        let converters = ConverterRegistry::new(&config);
        Self {
            config,
            descriptors,
            converters,
        }
    }

    pub fn config(&self) -> &DtoConfig {
        &self.config
    }

    pub fn descriptors(&self) -> &DescriptorCache {
        &self.descriptors
    }

    pub fn converters(&self) -> &ConverterRegistry {
        &self.converters
    }
}

impl Default for DtoRegistry {
    fn default() -> Self {
        Self::new(DtoConfig::default())
    }
}

/// Handle used to construct DTOs.
#[derive(Debug, Clone, Default)]
pub struct DtoEngine {
    registry: Arc<DtoRegistry>,
}

impl DtoEngine {
    pub fn new(registry: Arc<DtoRegistry>) -> Self {
        Self { registry }
    }

    pub fn from_config(config: DtoConfig) -> Self {
        Self::new(Arc::new(DtoRegistry::new(config)))
    }

    pub fn registry(&self) -> &DtoRegistry {
        &self.registry
    }

    /// Register a user converter addressable by name.
    pub fn register_converter(&self, name: impl Into<String>, converter: Arc<dyn TypeConverter>) {
        self.registry.converters.register(name, converter);
    }

    /// Cached descriptor for `T`.
    pub fn descriptor<T: DataTransferObject>(&self) -> Arc<TypeDescriptor> {
        self.registry.descriptors.get_or_describe(DtoRef::of::<T>())
    }

    /// Construct a `T` from an untyped map.
    pub fn construct<T: DataTransferObject>(&self, input: Map) -> Result<Dto, DtoError> {
        self.construct_ref(DtoRef::of::<T>(), input)
    }

    /// Construct a `T` from a JSON object.
    pub fn construct_json<T: DataTransferObject>(&self, input: JsonValue) -> Result<Dto, DtoError> {
        match Value::from(input) {
            Value::Map(map) => self.construct::<T>(map),
            other => Err(DtoError::Decode {
                target: T::NAME,
                message: format!("expected a JSON object, {} given", other.type_name()),
            }),
        }
    }

    /// Construct the DTO type behind `target`; used for nested construction.
    pub fn construct_ref(&self, target: DtoRef, input: Map) -> Result<Dto, DtoError> {
        let normalized = normalize_map(&input);
        let descriptor = self.registry.descriptors.get_or_describe(target);
        debug!(
            dto = descriptor.name(),
            keys = input.len(),
            "Constructing DTO"
        );

        let mut fields = Map::with_capacity(descriptor.properties().len());
        for property in descriptor.properties() {
            let Some(field) = property.field() else {
                continue;
            };
            let key = normalize(field.external_name());
            let raw = normalized.get(&key);

            if field.is_required() && raw.is_none() {
                debug!(
                    dto = descriptor.name(),
                    property = property.name(),
                    field = field.external_name(),
                    "Required field missing"
                );
                return Err(DtoError::MissingRequiredField {
                    dto: descriptor.name(),
                    property: property.name(),
                    field: field.external_name(),
                });
            }

            let converter = self.registry.converters.resolve_for(property)?;
            let cx = ConvertContext::new(self, Some(property.name()));
            let value = converter
                .convert(raw.cloned().unwrap_or_default(), &cx)
                .map_err(|err| attribute(err, property.name()))?;

            validate::check(&descriptor, property, &value)?;
            fields.insert(property.name().to_string(), value);
        }

        Ok(Dto::new(descriptor, input, normalized, fields))
    }
}

// Converter errors raised without a property get the one being converted.
fn attribute(err: DtoError, property: &'static str) -> DtoError {
    match err {
        DtoError::Conversion {
            converter,
            property: None,
            message,
        } => DtoError::Conversion {
            converter,
            property: Some(property),
            message,
        },
        other => other,
    }
}
