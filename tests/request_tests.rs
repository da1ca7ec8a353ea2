mod common;

use common::fixtures::ExampleDto;
use dtomapper::request::UploadedFile;
use dtomapper::{merge_request, DtoEngine, ErrorKind, Map, ParsedRequest, RequestSource, Value};

#[test]
fn test_dto_from_form_post() {
    let engine = DtoEngine::default();
    let request = ParsedRequest::new("POST", "/test")
        .with_body("application/x-www-form-urlencoded", "userId=5&name=John");

    let dto = engine.from_request::<ExampleDto, _>(&request).unwrap();
    assert_eq!(dto.value::<i64>("userId"), Some(5));
    assert_eq!(dto.value::<String>("name"), Some("John".to_string()));
}

#[test]
fn test_dto_from_query_and_json_body() {
    let engine = DtoEngine::default();
    let request = ParsedRequest::new("PUT", "/test?user_id=8&name=query")
        .with_body(
            "application/json; charset=utf-8",
            r#"{"name":"body","nested":{"code":"3","label":"gold"}}"#,
        );

    let dto = engine.from_request::<ExampleDto, _>(&request).unwrap();
    assert_eq!(dto.value::<i64>("userId"), Some(8));
    assert_eq!(dto.value::<String>("name"), Some("body".to_string()));
    assert_eq!(dto.nested("nested").and_then(|n| n.value::<i64>("code")), Some(3));
}

#[test]
fn test_dto_from_json_body_sent_as_plain_text() {
    let engine = DtoEngine::default();
    let request = ParsedRequest::new("POST", "/test").with_body("text/plain", r#"{"userId":3}"#);

    let dto = engine.from_request::<ExampleDto, _>(&request).unwrap();
    assert_eq!(dto.value::<i64>("userId"), Some(3));
}

#[test]
fn test_request_missing_required_field() {
    let engine = DtoEngine::default();
    let request = ParsedRequest::new("GET", "/test?name=Alex");
    let err = engine.from_request::<ExampleDto, _>(&request).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredField);
}

/// A request type from some other HTTP stack.
struct FakeRequest;

impl RequestSource for FakeRequest {
    fn query(&self) -> Map {
        [("a".to_string(), Value::from("query")), ("b".to_string(), Value::from("query"))]
            .into_iter()
            .collect()
    }

    fn post(&self) -> Map {
        [("b".to_string(), Value::from("post")), ("c".to_string(), Value::from("post"))]
            .into_iter()
            .collect()
    }

    fn json(&self) -> Map {
        [("c".to_string(), Value::from("json")), ("d".to_string(), Value::from("json"))]
            .into_iter()
            .collect()
    }

    fn files(&self) -> Map {
        [("d".to_string(), Value::from("file"))].into_iter().collect()
    }
}

#[test]
fn test_merge_precedence_for_custom_sources() {
    let merged = merge_request(&FakeRequest);
    assert_eq!(merged.get("a"), Some(&Value::from("query")));
    assert_eq!(merged.get("b"), Some(&Value::from("post")));
    assert_eq!(merged.get("c"), Some(&Value::from("json")));
    assert_eq!(merged.get("d"), Some(&Value::from("file")));
}

#[test]
fn test_uploaded_files_are_exposed_as_metadata() {
    let request = ParsedRequest::new("POST", "/upload").with_file(UploadedFile {
        field: "avatar".into(),
        file_name: "me.png".into(),
        content_type: None,
        size: 2048,
    });
    let files = request.files();
    let avatar = files.get("avatar").and_then(Value::as_map).unwrap();
    assert_eq!(avatar.get("name"), Some(&Value::from("me.png")));
    assert_eq!(avatar.get("type"), Some(&Value::Null));
    assert_eq!(avatar.get("size"), Some(&Value::Int(2048)));
}
