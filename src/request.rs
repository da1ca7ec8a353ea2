//! Request binding.
//!
//! Any HTTP request type can feed a DTO by implementing [`RequestSource`].
//! [`merge_request`] folds its four inputs into one map, query first, then
//! form data, JSON body and uploaded files, later sources overriding earlier
//! ones on key collision.
//!
//! [`ParsedRequest`] is a small owned request representation for servers that
//! do their own HTTP parsing, and for tests.

use crate::engine::{Dto, DtoEngine};
use crate::error::DtoError;
use crate::schema::DataTransferObject;
use crate::value::{Map, Value};
use std::collections::HashMap;

/// Accessors of an HTTP-like request.
pub trait RequestSource {
    fn query(&self) -> Map;
    fn post(&self) -> Map;
    fn json(&self) -> Map;
    fn files(&self) -> Map;
}

/// Merge query, post, json and files, in that order.
pub fn merge_request<R: RequestSource + ?Sized>(request: &R) -> Map {
    let mut merged = request.query();
    merged.extend(request.post());
    merged.extend(request.json());
    merged.extend(request.files());
    merged
}

impl DtoEngine {
    /// Construct a `T` from the merged inputs of `request`.
    pub fn from_request<T, R>(&self, request: &R) -> Result<Dto, DtoError>
    where
        T: DataTransferObject,
        R: RequestSource + ?Sized,
    {
        self.construct::<T>(merge_request(request))
    }
}

/// Metadata of one uploaded file.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub field: String,
    pub file_name: String,
    pub content_type: Option<String>,
    pub size: u64,
}

impl UploadedFile {
    fn to_value(&self) -> Value {
        let mut meta = Map::new();
        meta.insert("name".into(), Value::from(self.file_name.as_str()));
        meta.insert("type".into(), self.content_type.clone().into());
        meta.insert("size".into(), Value::Int(i64::try_from(self.size).unwrap_or(i64::MAX)));
        Value::Map(meta)
    }
}

/// Owned request data.
#[derive(Debug, Clone, Default)]
pub struct ParsedRequest {
    /// HTTP method (GET, POST, etc.)
    pub method: String,
    /// Request path including query string
    pub path: String,
    /// HTTP headers (lowercase keys)
    pub headers: HashMap<String, String>,
    /// Raw request body
    pub body: Option<String>,
    pub files: Vec<UploadedFile>,
}

impl ParsedRequest {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_lowercase(), value.into());
        self
    }

    pub fn with_body(mut self, content_type: &str, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self.with_header("content-type", content_type)
    }

    pub fn with_file(mut self, file: UploadedFile) -> Self {
        self.files.push(file);
        self
    }

    fn content_type(&self) -> &str {
        self.headers
            .get("content-type")
            .map(String::as_str)
            .unwrap_or("")
    }
}

impl RequestSource for ParsedRequest {
    fn query(&self) -> Map {
        match self.path.split_once('?') {
            Some((_, query)) => parse_form(query),
            None => Map::new(),
        }
    }

    fn post(&self) -> Map {
        match &self.body {
            Some(body) if self.content_type().starts_with("application/x-www-form-urlencoded") => {
                parse_form(body)
            }
            _ => Map::new(),
        }
    }

    /// Any body that decodes to a JSON object, whatever its content type.
    fn json(&self) -> Map {
        let Some(body) = &self.body else {
            return Map::new();
        };
        match serde_json::from_str::<serde_json::Value>(body).map(Value::from) {
            Ok(Value::Map(map)) => map,
            _ => Map::new(),
        }
    }

    fn files(&self) -> Map {
        self.files
            .iter()
            .map(|file| (file.field.clone(), file.to_value()))
            .collect()
    }
}

/// Parse `application/x-www-form-urlencoded` text.
///
/// Values stay strings. A key ending in `[]` collects its values into a list
/// under the bare key; otherwise the last occurrence wins.
pub fn parse_form(input: &str) -> Map {
    let mut out = Map::new();
    for (key, value) in url::form_urlencoded::parse(input.as_bytes()) {
        let value = Value::String(value.into_owned());
        match key.strip_suffix("[]") {
            Some(list_key) => {
                let slot = out
                    .entry(list_key.to_string())
                    .or_insert_with(|| Value::List(Vec::new()));
                if let Value::List(items) = slot {
                    items.push(value);
                } else {
                    *slot = Value::List(vec![value]);
                }
            }
            None => {
                out.insert(key.into_owned(), value);
            }
        }
    }
    out
}
