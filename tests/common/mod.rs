#![allow(dead_code)]

use dtomapper::converters::{ConverterKind, ConverterSpec};
use dtomapper::{DataTransferObject, DeclaredType, FieldSpec, Map, TypeDescriptor, Value};
use serde_json::json;

pub mod fixtures {
    use super::*;

    /// `userId` (required int), `name`, `data` and an optional nested DTO.
    pub struct ExampleDto;

    impl DataTransferObject for ExampleDto {
        const NAME: &'static str = "ExampleDto";

        fn describe() -> TypeDescriptor {
            TypeDescriptor::of::<Self>()
                .field(
                    "userId",
                    DeclaredType::int(),
                    FieldSpec::new("user_id", ConverterKind::Int.into()).required(),
                )
                .field(
                    "name",
                    DeclaredType::string().nullable(),
                    FieldSpec::new("name", ConverterKind::String.into()),
                )
                .field(
                    "data",
                    DeclaredType::array(),
                    FieldSpec::new("data", ConverterKind::Array.into()),
                )
                .field(
                    "nested",
                    DeclaredType::dto::<NestedDto>().nullable(),
                    FieldSpec::new("nested", ConverterSpec::Dto),
                )
                .build()
        }
    }

    pub struct NestedDto;

    impl DataTransferObject for NestedDto {
        const NAME: &'static str = "NestedDto";

        fn describe() -> TypeDescriptor {
            TypeDescriptor::of::<Self>()
                .field(
                    "code",
                    DeclaredType::int(),
                    FieldSpec::new("code", ConverterKind::Int.into()),
                )
                .field(
                    "label",
                    DeclaredType::string(),
                    FieldSpec::new("label", ConverterKind::String.into()),
                )
                .build()
        }
    }
}

/// Map from a JSON object literal.
pub fn map(value: serde_json::Value) -> Map {
    match Value::from(value) {
        Value::Map(map) => map,
        other => panic!("expected a JSON object, got {}", other.type_name()),
    }
}

/// The canonical example input: string numbers, JSON text and a nested map.
pub fn example_input() -> Map {
    map(json!({
        "userId": "5",
        "name": "Alex",
        "data": "{\"a\":1}",
        "nested": {"code": "7", "label": "VIP"}
    }))
}
