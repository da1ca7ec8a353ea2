use super::{ConvertContext, TypeConverter};
use crate::error::DtoError;
use crate::value::{Collection, Fluent, Map, Value};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};

/// Identity converter.
#[derive(Debug, Default, Clone, Copy)]
pub struct DynamicConverter;

impl TypeConverter for DynamicConverter {
    fn name(&self) -> &str {
        "dynamic"
    }

    fn convert(&self, value: Value, _cx: &ConvertContext<'_>) -> Result<Value, DtoError> {
        Ok(value)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StringConverter;

impl TypeConverter for StringConverter {
    fn name(&self) -> &str {
        "string"
    }

    fn convert(&self, value: Value, cx: &ConvertContext<'_>) -> Result<Value, DtoError> {
        match value {
            Value::Null => Ok(Value::Null),
            Value::String(s) => Ok(Value::String(s)),
            Value::Int(i) => Ok(Value::String(i.to_string())),
            Value::Float(f) => Ok(Value::String(f.to_string())),
            // true reads as "1", false as the empty string
            Value::Bool(b) => Ok(Value::String(if b { "1" } else { "" }.to_string())),
            other => Err(cx.error(
                self.name(),
                format!("Cannot convert {} to string", other.type_name()),
            )),
        }
    }
}

/// Result of scanning the numeric prefix of a string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Numeric {
    Int(i64),
    Float(f64),
}

impl Numeric {
    fn as_i64(self) -> i64 {
        match self {
            Numeric::Int(i) => i,
            // saturating, NaN becomes 0
            Numeric::Float(f) => f as i64,
        }
    }

    fn as_f64(self) -> f64 {
        match self {
            Numeric::Int(i) => i as f64,
            Numeric::Float(f) => f,
        }
    }
}

/// Leading numeric portion of `text`: optional whitespace, sign, digits, an
/// optional fraction and an optional exponent. Returns the parsed number and
/// whether it consumed the whole (trailing-whitespace-trimmed) text.
pub(crate) fn numeric_prefix(text: &str) -> Option<(Numeric, bool)> {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;
    let mut is_float = false;

    if bytes.get(end) == Some(&b'.') {
        let mut frac_end = end + 1;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        let frac_digits = frac_end - end - 1;
        if digits + frac_digits > 0 {
            digits += frac_digits;
            is_float = true;
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            is_float = true;
            end = exp_end;
        }
    }

    let literal = &trimmed[..end];
    let complete = trimmed[end..].trim_end().is_empty();
    let number = if is_float {
        Numeric::Float(literal.parse().ok()?)
    } else {
        match literal.parse::<i64>() {
            Ok(i) => Numeric::Int(i),
            // too large for i64, keep the magnitude
            Err(_) => Numeric::Float(literal.parse().ok()?),
        }
    };
    Some((number, complete))
}

/// Lenient numeric reading shared by the int and float converters.
fn lenient_number(
    converter: &str,
    value: &Value,
    strict: bool,
    cx: &ConvertContext<'_>,
) -> Result<Numeric, DtoError> {
    let number = match value {
        Value::Null => Numeric::Int(0),
        Value::Bool(b) => Numeric::Int(i64::from(*b)),
        Value::Int(i) => Numeric::Int(*i),
        Value::Float(f) => Numeric::Float(*f),
        Value::String(s) => match numeric_prefix(s) {
            Some((number, complete)) if complete || !strict => number,
            _ if strict => {
                return Err(cx.error(converter, format!("'{}' is not numeric", s)));
            }
            _ => Numeric::Int(0),
        },
        Value::List(items) => Numeric::Int(i64::from(!items.is_empty())),
        Value::Map(map) => Numeric::Int(i64::from(!map.is_empty())),
        other if strict => {
            return Err(cx.error(
                converter,
                format!("Cannot read a number from {}", other.type_name()),
            ));
        }
        // any other object reads as one
        _ => Numeric::Int(1),
    };
    Ok(number)
}

/// Integer converter. Non-numeric text yields `0` unless `strict` is set.
#[derive(Debug, Default, Clone, Copy)]
pub struct IntConverter {
    strict: bool,
}

impl IntConverter {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }
}

impl TypeConverter for IntConverter {
    fn name(&self) -> &str {
        "int"
    }

    fn convert(&self, value: Value, cx: &ConvertContext<'_>) -> Result<Value, DtoError> {
        lenient_number(self.name(), &value, self.strict, cx).map(|n| Value::Int(n.as_i64()))
    }
}

/// Float converter with the same leniency as [`IntConverter`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FloatConverter {
    strict: bool,
}

impl FloatConverter {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }
}

impl TypeConverter for FloatConverter {
    fn name(&self) -> &str {
        "float"
    }

    fn convert(&self, value: Value, cx: &ConvertContext<'_>) -> Result<Value, DtoError> {
        lenient_number(self.name(), &value, self.strict, cx).map(|n| Value::Float(n.as_f64()))
    }
}

/// True when the value strictly equals one of the configured tokens.
#[derive(Debug, Clone)]
pub struct BooleanConverter {
    truthy: Vec<Value>,
}

impl BooleanConverter {
    pub fn new(truthy: Vec<Value>) -> Self {
        Self { truthy }
    }

    /// `"1"`, `"true"`, `"on"`, `1` and `true`.
    pub fn default_tokens() -> Vec<Value> {
        vec![
            Value::from("1"),
            Value::from("true"),
            Value::from("on"),
            Value::Int(1),
            Value::Bool(true),
        ]
    }
}

impl Default for BooleanConverter {
    fn default() -> Self {
        Self::new(Self::default_tokens())
    }
}

impl TypeConverter for BooleanConverter {
    fn name(&self) -> &str {
        "boolean"
    }

    fn convert(&self, value: Value, _cx: &ConvertContext<'_>) -> Result<Value, DtoError> {
        Ok(Value::Bool(self.truthy.contains(&value)))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ArrayConverter;

impl ArrayConverter {
    fn coerce(value: Value) -> Value {
        match value {
            Value::Null => Value::List(Vec::new()),
            Value::List(items) => Value::List(items),
            Value::Map(map) => Value::Map(map),
            Value::Collection(c) => c.into_value(),
            Value::Fluent(f) => Value::Map(f.into_attributes()),
            Value::Dto(dto) => Value::Map(dto.to_array()),
            other => Value::List(vec![other]),
        }
    }
}

impl TypeConverter for ArrayConverter {
    fn name(&self) -> &str {
        "array"
    }

    fn convert(&self, value: Value, cx: &ConvertContext<'_>) -> Result<Value, DtoError> {
        let Value::String(text) = value else {
            return Ok(Self::coerce(value));
        };
        match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(decoded) => Ok(Self::coerce(Value::from(decoded))),
            Err(err) => {
                // Only text shaped like a JSON container is held to the grammar
                let trimmed = text.trim_start();
                if trimmed.starts_with('{') || trimmed.starts_with('[') {
                    Err(cx.error(self.name(), format!("malformed JSON: {}", err)))
                } else {
                    Ok(Value::List(vec![Value::String(text)]))
                }
            }
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CollectionConverter;

impl TypeConverter for CollectionConverter {
    fn name(&self) -> &str {
        "collection"
    }

    fn convert(&self, value: Value, cx: &ConvertContext<'_>) -> Result<Value, DtoError> {
        match value {
            Value::Null => Ok(Value::Null),
            Value::List(items) => Ok(Value::Collection(Collection::from_list(items))),
            Value::Map(map) => Ok(Value::Collection(Collection::from_map(map))),
            Value::Collection(c) => Ok(Value::Collection(c)),
            other => Err(cx.error(
                self.name(),
                format!("Collection converter requires an array, {} given", other.type_name()),
            )),
        }
    }
}

const NAIVE_DATE_TIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
];

const NAIVE_DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Calendar date-time converter. Values without an offset are placed in `offset`.
#[derive(Debug, Clone, Copy)]
pub struct DateConverter {
    offset: FixedOffset,
}

impl DateConverter {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    fn parse(&self, text: &str) -> Option<DateTime<FixedOffset>> {
        let text = text.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
            return Some(parsed);
        }
        if let Ok(parsed) = DateTime::parse_from_rfc2822(text) {
            return Some(parsed);
        }
        let naive = NAIVE_DATE_TIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
            .or_else(|| {
                NAIVE_DATE_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })?;
        self.offset.from_local_datetime(&naive).single()
    }
}

impl Default for DateConverter {
    fn default() -> Self {
        Self::new(Utc.fix())
    }
}

impl TypeConverter for DateConverter {
    fn name(&self) -> &str {
        "date"
    }

    fn convert(&self, value: Value, cx: &ConvertContext<'_>) -> Result<Value, DtoError> {
        if value.is_blank() {
            return Ok(Value::Null);
        }
        match value {
            Value::Date(date) => Ok(Value::Date(date)),
            Value::Int(timestamp) => DateTime::from_timestamp(timestamp, 0)
                .map(|utc| Value::Date(utc.with_timezone(&self.offset)))
                .ok_or_else(|| {
                    cx.error(self.name(), format!("timestamp {} is out of range", timestamp))
                }),
            Value::String(text) => self.parse(&text).map(Value::Date).ok_or_else(|| {
                cx.error(self.name(), format!("could not parse '{}' as a date", text))
            }),
            other => Err(cx.error(
                self.name(),
                format!("Cannot convert {} to a date", other.type_name()),
            )),
        }
    }
}

/// Wraps a container in a [`Fluent`]; anything else becomes `null`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FluentConverter;

impl TypeConverter for FluentConverter {
    fn name(&self) -> &str {
        "fluent"
    }

    fn convert(&self, value: Value, _cx: &ConvertContext<'_>) -> Result<Value, DtoError> {
        Ok(match value {
            Value::Map(map) => Value::Fluent(Fluent::new(map)),
            Value::List(items) => Value::Fluent(Fluent::new(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| (i.to_string(), v))
                    .collect::<Map>(),
            )),
            _ => Value::Null,
        })
    }
}
