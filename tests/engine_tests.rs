mod common;

use common::fixtures::{ExampleDto, NestedDto};
use common::{example_input, map};
use dtomapper::converters::{ConvertContext, ConverterKind, ConverterSpec, TypeConverter};
use dtomapper::value::Tagged;
use dtomapper::{
    DataTransferObject, DeclaredType, DtoConfig, DtoEngine, DtoError, ErrorKind, FieldSpec,
    TypeDescriptor, Value,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[test]
fn test_basic_construction() {
    let engine = DtoEngine::default();
    let dto = engine.construct::<ExampleDto>(example_input()).unwrap();

    assert!(dto.is::<ExampleDto>());
    assert_eq!(dto.type_name(), "ExampleDto");
    assert_eq!(dto.value::<i64>("userId"), Some(5));
    assert_eq!(dto.value::<String>("name"), Some("Alex".to_string()));
    assert_eq!(dto.get("data"), Some(&Value::from(json!({"a": 1}))));

    let nested = dto.nested("nested").unwrap();
    assert!(nested.is::<NestedDto>());
    assert_eq!(nested.value::<i64>("code"), Some(7));
    assert_eq!(nested.value::<String>("label"), Some("VIP".to_string()));
}

#[test]
fn test_to_array_reproduces_converted_shape() {
    let engine = DtoEngine::default();
    let dto = engine.construct::<ExampleDto>(example_input()).unwrap();

    assert_eq!(
        dto.to_json(),
        json!({
            "userId": 5,
            "name": "Alex",
            "data": {"a": 1},
            "nested": {"code": 7, "label": "VIP"}
        })
    );
    let keys: Vec<_> = dto.to_array().keys().cloned().collect();
    assert_eq!(keys, ["userId", "name", "data", "nested"]);
}

#[test]
fn test_serialize_matches_to_array_and_skips_raw_input() {
    let engine = DtoEngine::default();
    let dto = engine.construct::<ExampleDto>(example_input()).unwrap();

    let text = serde_json::to_string(&dto).unwrap();
    assert_eq!(
        text,
        r#"{"userId":5,"name":"Alex","data":{"a":1},"nested":{"code":7,"label":"VIP"}}"#
    );
}

#[test]
fn test_nested_null_serialization() {
    let engine = DtoEngine::default();
    let dto = engine
        .construct_json::<ExampleDto>(json!({
            "userId": 1,
            "name": null,
            "data": [],
            "nested": {"code": 100, "label": "Level 1"}
        }))
        .unwrap();

    assert_eq!(
        dto.to_json(),
        json!({
            "userId": 1,
            "name": null,
            "data": [],
            "nested": {"code": 100, "label": "Level 1"}
        })
    );
}

#[test]
fn test_missing_required_field() {
    let engine = DtoEngine::default();
    let err = engine
        .construct_json::<ExampleDto>(json!({"name": "Alex"}))
        .unwrap_err();

    assert_eq!(
        err,
        DtoError::MissingRequiredField {
            dto: "ExampleDto",
            property: "userId",
            field: "user_id",
        }
    );
    assert_eq!(err.kind(), ErrorKind::MissingRequiredField);
}

#[test]
fn test_missing_required_field_wins_over_later_invalid_fields() {
    let engine = DtoEngine::default();
    // `nested` would fail on its own, but construction stops at `userId`
    let err = engine
        .construct_json::<ExampleDto>(json!({"nested": "not a map"}))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredField);
}

#[test]
fn test_raw_data_is_kept_verbatim() {
    let engine = DtoEngine::default();
    let input = map(json!({"userId": "10", "name": "Original", "data": [], "extra": ""}));
    let dto = engine.construct::<ExampleDto>(input.clone()).unwrap();

    assert_eq!(dto.raw_data(), &input);
    assert!(dto.normalized().contains_key("user_id"));
    assert!(!dto.normalized().contains_key("extra"));
}

#[test]
fn test_empty_string_reads_as_absent() {
    let engine = DtoEngine::default();

    let err = engine
        .construct_json::<ExampleDto>(json!({"userId": ""}))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredField);

    let dto = engine
        .construct_json::<ExampleDto>(json!({"userId": 3, "name": ""}))
        .unwrap();
    assert_eq!(dto.get("name"), Some(&Value::Null));
}

#[test]
fn test_empty_string_alias_keeps_earlier_value() {
    let engine = DtoEngine::default();
    let dto = engine
        .construct::<ExampleDto>(map(json!({"userId": 5, "user_id": ""})))
        .unwrap();
    assert_eq!(dto.value::<i64>("userId"), Some(5));
}

#[test]
fn test_absent_optional_fields_take_converter_defaults() {
    let engine = DtoEngine::default();
    let dto = engine.construct_json::<ExampleDto>(json!({"user_id": 9})).unwrap();

    assert_eq!(dto.get("name"), Some(&Value::Null));
    assert_eq!(dto.get("data"), Some(&Value::List(Vec::new())));
    assert_eq!(dto.get("nested"), Some(&Value::Null));
}

#[test]
fn test_null_into_non_nullable_property() {
    let engine = DtoEngine::default();
    // The string converter keeps null; `label` is not nullable
    let err = engine
        .construct_json::<NestedDto>(json!({"code": 1}))
        .unwrap_err();

    assert_eq!(
        err,
        DtoError::NullNotAllowed {
            dto: "NestedDto",
            property: "label",
        }
    );
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
}

#[test]
fn test_instance_of_unrelated_dto_is_a_type_mismatch() {
    let engine = DtoEngine::default();
    let other = engine
        .construct_json::<ExampleDto>(json!({"userId": 1}))
        .unwrap();

    let mut input = map(json!({"userId": 2}));
    input.insert("nested".into(), Value::Dto(Arc::new(other)));
    let err = engine.construct::<ExampleDto>(input).unwrap_err();

    assert_eq!(
        err,
        DtoError::TypeMismatch {
            dto: "ExampleDto",
            property: "nested",
            expected: "NestedDto".into(),
            actual: "ExampleDto".into(),
        }
    );
}

#[test]
fn test_constructed_nested_instance_passes_through() {
    let engine = DtoEngine::default();
    let nested = engine
        .construct_json::<NestedDto>(json!({"code": 4, "label": "x"}))
        .unwrap();

    let mut input = map(json!({"userId": 2}));
    input.insert("nested".into(), Value::from(nested.clone()));
    let dto = engine.construct::<ExampleDto>(input).unwrap();

    assert_eq!(dto.nested("nested"), Some(&nested));
}

#[test]
fn test_nested_converter_rejects_scalars() {
    let engine = DtoEngine::default();
    let err = engine
        .construct_json::<ExampleDto>(json!({"userId": 1, "nested": "VIP"}))
        .unwrap_err();

    assert_eq!(
        err,
        DtoError::UnsupportedConversionTarget {
            property: None,
            target: "NestedDto".into(),
            actual: "string".into(),
        }
    );
}

#[test]
fn test_nested_failure_aborts_outer_construction() {
    let engine = DtoEngine::default();
    let err = engine
        .construct_json::<ExampleDto>(json!({"userId": 1, "nested": {"code": 1}}))
        .unwrap_err();
    assert!(matches!(
        err,
        DtoError::NullNotAllowed {
            dto: "NestedDto",
            ..
        }
    ));
}

struct BadReference;

impl DataTransferObject for BadReference {
    const NAME: &'static str = "BadReference";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::of::<Self>()
            .field(
                "owner",
                DeclaredType::int().nullable(),
                FieldSpec::new("owner", ConverterSpec::Dto),
            )
            .build()
    }
}

#[test]
fn test_dto_converter_on_non_dto_property() {
    let engine = DtoEngine::default();
    let err = engine
        .construct_json::<BadReference>(json!({"owner": {"id": 1}}))
        .unwrap_err();

    assert_eq!(
        err,
        DtoError::UnsupportedConversionTarget {
            property: Some("owner"),
            target: "int".to_string(),
            actual: "dto marker".to_string(),
        }
    );
    assert!(err.to_string().contains("owner"));
}

#[test]
fn test_malformed_json_text_is_a_conversion_error() {
    let engine = DtoEngine::default();
    let err = engine
        .construct_json::<ExampleDto>(json!({"userId": 1, "data": "{\"a\":"}))
        .unwrap_err();

    match err {
        DtoError::Conversion {
            converter, property, ..
        } => {
            assert_eq!(converter, "array");
            assert_eq!(property, Some("data"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_lenient_numbers_by_default_and_strict_on_request() {
    let lenient = DtoEngine::default();
    let dto = lenient
        .construct_json::<ExampleDto>(json!({"userId": "abc"}))
        .unwrap();
    assert_eq!(dto.value::<i64>("userId"), Some(0));

    let dto = lenient
        .construct_json::<ExampleDto>(json!({"userId": " 12apples"}))
        .unwrap();
    assert_eq!(dto.value::<i64>("userId"), Some(12));

    let strict = DtoEngine::from_config(DtoConfig {
        strict_numbers: true,
        ..DtoConfig::default()
    });
    let err = strict
        .construct_json::<ExampleDto>(json!({"userId": "abc"}))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conversion);
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct ExampleView {
    user_id: i64,
    name: Option<String>,
    nested: Option<NestedView>,
}

#[derive(Debug, Deserialize, PartialEq)]
struct NestedView {
    code: i64,
    label: String,
}

#[test]
fn test_deserialize_into_plain_struct() {
    let engine = DtoEngine::default();
    let dto = engine.construct::<ExampleDto>(example_input()).unwrap();

    let view: ExampleView = dto.deserialize().unwrap();
    assert_eq!(
        view,
        ExampleView {
            user_id: 5,
            name: Some("Alex".into()),
            nested: Some(NestedView {
                code: 7,
                label: "VIP".into(),
            }),
        }
    );

    let err = dto.deserialize::<NestedView>().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[derive(Default)]
struct MoneyConverter;

impl TypeConverter for MoneyConverter {
    fn name(&self) -> &str {
        "money"
    }

    fn convert(&self, value: Value, cx: &ConvertContext<'_>) -> Result<Value, DtoError> {
        match value {
            Value::Null => Ok(Value::Null),
            Value::Int(cents) => Ok(Tagged::new("Money", cents).into()),
            other => Err(cx.error(self.name(), format!("cannot read {} as money", other.type_name()))),
        }
    }
}

struct UpperConverter;

impl TypeConverter for UpperConverter {
    fn convert(&self, value: Value, _cx: &ConvertContext<'_>) -> Result<Value, DtoError> {
        Ok(match value {
            Value::String(s) => Value::String(s.to_uppercase()),
            other => other,
        })
    }
}

struct InvoiceDto;

impl DataTransferObject for InvoiceDto {
    const NAME: &'static str = "InvoiceDto";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::of::<Self>()
            .field(
                "total",
                DeclaredType::tagged("Money"),
                FieldSpec::new("total", ConverterSpec::custom::<MoneyConverter>()).required(),
            )
            .field(
                "currency",
                DeclaredType::string().nullable(),
                FieldSpec::new("currency", ConverterSpec::named("upper")),
            )
            .field(
                "status",
                DeclaredType::mixed(),
                FieldSpec::new("status", ConverterKind::Enum.into()),
            )
            .build()
    }
}

#[test]
fn test_user_converters_by_type_and_by_name() {
    let engine = DtoEngine::default();
    engine.register_converter("upper", Arc::new(UpperConverter));

    let dto = engine
        .construct_json::<InvoiceDto>(json!({"total": 1250, "currency": "eur", "status": "paid"}))
        .unwrap();

    assert_eq!(dto.get("total"), Some(&Value::from(Tagged::new("Money", 1250))));
    assert_eq!(dto.get("currency"), Some(&Value::from("EUR")));
    assert_eq!(dto.get("status"), Some(&Value::from("paid")));
    assert_eq!(dto.to_json(), json!({"total": 1250, "currency": "EUR", "status": "paid"}));

    let err = engine
        .construct_json::<InvoiceDto>(json!({"total": "12.50"}))
        .unwrap_err();
    match err {
        DtoError::Conversion {
            converter, property, ..
        } => {
            assert_eq!(converter, "money");
            assert_eq!(property, Some("total"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_unregistered_named_converter_is_identity() {
    let engine = DtoEngine::default();
    let dto = engine
        .construct_json::<InvoiceDto>(json!({"total": 1, "currency": "eur"}))
        .unwrap();
    assert_eq!(dto.get("currency"), Some(&Value::from("eur")));
}

#[test]
fn test_concurrent_constructions_share_one_registry() {
    let engine = DtoEngine::default();

    std::thread::scope(|scope| {
        for i in 0..8_i64 {
            let engine = engine.clone();
            scope.spawn(move || {
                let dto = engine
                    .construct_json::<ExampleDto>(json!({
                        "userId": i.to_string(),
                        "nested": {"code": i, "label": "t"}
                    }))
                    .unwrap();
                assert_eq!(dto.value::<i64>("userId"), Some(i));
            });
        }
    });

    assert_eq!(engine.registry().descriptors().len(), 2);
}
