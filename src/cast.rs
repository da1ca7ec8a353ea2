//! Storage casting for DTO-valued attributes.
//!
//! A [`DtoCast`] sits between a persistence layer and a DTO type: stored
//! values (JSON text or already decoded maps) are read back into DTOs, and
//! DTOs are written out as JSON text of their serialized form.

use crate::engine::{Dto, DtoEngine};
use crate::error::DtoError;
use crate::schema::{DataTransferObject, DtoRef};
use crate::value::{Map, Value};

#[derive(Debug, Clone)]
pub struct DtoCast {
    engine: DtoEngine,
    target: DtoRef,
}

impl DtoCast {
    pub fn for_type<T: DataTransferObject>(engine: DtoEngine) -> Self {
        Self {
            engine,
            target: DtoRef::of::<T>(),
        }
    }

    pub fn target(&self) -> DtoRef {
        self.target
    }

    /// Read a stored value. `null` reads as `None`.
    pub fn get(&self, stored: &Value) -> Result<Option<Dto>, DtoError> {
        let data = match stored {
            Value::Null => return Ok(None),
            Value::String(text) => serde_json::from_str::<serde_json::Value>(text)
                .map(Value::from)
                .map_err(|e| self.decode_error(e.to_string()))?,
            Value::Dto(dto) if dto.type_id() == self.target.type_id() => {
                return Ok(Some(Dto::clone(dto)));
            }
            other => other.clone(),
        };
        match data {
            Value::Map(map) => self.engine.construct_ref(self.target, map).map(Some),
            other => Err(self.decode_error(format!(
                "expected an object, {} given",
                other.type_name()
            ))),
        }
    }

    /// Value to store under `key`: DTOs become JSON text, anything else is kept.
    pub fn set(&self, key: &str, value: Value) -> Map {
        let stored = match value {
            Value::Dto(dto) => Value::String(Self::encode(&dto)),
            other => other,
        };
        let mut out = Map::new();
        out.insert(key.to_string(), stored);
        out
    }

    /// Canonical stored form of `dto`.
    pub fn encode(dto: &Dto) -> String {
        dto.to_json().to_string()
    }

    fn decode_error(&self, message: String) -> DtoError {
        DtoError::Decode {
            target: self.target.name(),
            message,
        }
    }
}
