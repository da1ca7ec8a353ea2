//! # Key Normalization
//!
//! Canonicalizes input keys so producers and consumers of field names do not
//! need to agree on a casing convention. `userId` and `user_id` both normalize
//! to `user_id`.
//!
//! Only a lowercase letter directly followed by an uppercase letter is split.
//! Runs of capitals are kept together, so `UserID` becomes `user_id` while
//! `userIDNumber` becomes `user_idnumber`.

use crate::value::{Map, Value};
use once_cell::sync::Lazy;
use regex::Regex;

#[allow(clippy::expect_used)]
static CAMEL_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z])([A-Z])").expect("camel boundary regex is valid"));

/// Normalize a single key: `_` at every lower→upper boundary, then ASCII lowercase.
///
/// Idempotent: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(key: &str) -> String {
    CAMEL_BOUNDARY
        .replace_all(key, "${1}_${2}")
        .to_ascii_lowercase()
}

/// Normalize every key of `input`.
///
/// Empty-string values are treated as "not provided" and dropped, so a required
/// field given as `""` is reported missing and an optional one reads as `null`.
/// A dropped entry never shadows an earlier value for the same key. Otherwise
/// the later entry wins on key collisions after normalization.
pub fn normalize_map(input: &Map) -> Map {
    let mut out = Map::with_capacity(input.len());
    for (key, value) in input {
        let key = normalize(key);
        if matches!(value, Value::String(s) if s.is_empty()) {
            continue;
        }
        out.insert(key, value.clone());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_is_split() {
        assert_eq!(normalize("userId"), "user_id");
        assert_eq!(normalize("createdAtUtc"), "created_at_utc");
    }

    #[test]
    fn test_snake_case_is_unchanged() {
        assert_eq!(normalize("user_id"), "user_id");
        assert_eq!(normalize("label"), "label");
    }

    #[test]
    fn test_consecutive_capitals_are_not_split() {
        assert_eq!(normalize("UserID"), "user_id");
        assert_eq!(normalize("userIDNumber"), "user_idnumber");
        assert_eq!(normalize("HTTPRequest"), "httprequest");
    }

    #[test]
    fn test_idempotence() {
        for key in ["userId", "UserID", "a1B", "already_snake", "MiXeD_caseKey", "", "ÄbC"] {
            let once = normalize(key);
            assert_eq!(normalize(&once), once, "key {key:?}");
        }
    }

    #[test]
    fn test_empty_strings_are_dropped() {
        let mut input = Map::new();
        input.insert("firstName".into(), Value::from(""));
        input.insert("lastName".into(), Value::from("Doe"));
        input.insert("middle".into(), Value::Null);

        let out = normalize_map(&input);
        assert!(!out.contains_key("first_name"));
        assert_eq!(out.get("last_name"), Some(&Value::from("Doe")));
        assert_eq!(out.get("middle"), Some(&Value::Null));
    }

    #[test]
    fn test_later_key_wins_on_collision() {
        let mut input = Map::new();
        input.insert("userId".into(), Value::Int(1));
        input.insert("user_id".into(), Value::Int(2));
        assert_eq!(normalize_map(&input).get("user_id"), Some(&Value::Int(2)));

    }

    #[test]
    fn test_empty_string_does_not_shadow_earlier_value() {
        let mut input = Map::new();
        input.insert("userId".into(), Value::Int(5));
        input.insert("user_id".into(), Value::from(""));
        assert_eq!(normalize_map(&input).get("user_id"), Some(&Value::Int(5)));
    }
}
