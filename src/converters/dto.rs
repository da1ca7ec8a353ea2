use super::{ConvertContext, TypeConverter};
use crate::error::DtoError;
use crate::schema::DtoRef;
use crate::value::Value;
use std::sync::Arc;

/// Builds a nested DTO of a fixed target type.
///
/// `null` stays `null`, an already constructed DTO is passed through untouched
/// (the property type check decides whether it fits), and a map is constructed
/// recursively through the same engine.
#[derive(Debug, Clone, Copy)]
pub struct DtoReferenceConverter {
    target: DtoRef,
}

impl DtoReferenceConverter {
    pub fn new(target: DtoRef) -> Self {
        Self { target }
    }

    pub fn target(&self) -> DtoRef {
        self.target
    }
}

impl TypeConverter for DtoReferenceConverter {
    fn name(&self) -> &str {
        self.target.name()
    }

    fn convert(&self, value: Value, cx: &ConvertContext<'_>) -> Result<Value, DtoError> {
        match value {
            Value::Null => Ok(Value::Null),
            Value::Dto(dto) => Ok(Value::Dto(dto)),
            Value::Map(map) => {
                let nested = cx.engine().construct_ref(self.target, map)?;
                Ok(Value::Dto(Arc::new(nested)))
            }
            other => Err(DtoError::UnsupportedConversionTarget {
                property: None,
                target: self.target.name().to_string(),
                actual: other.type_name().to_string(),
            }),
        }
    }
}
