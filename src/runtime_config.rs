//! # Runtime Configuration Module
//!
//! Settings shared by every construction running through one
//! [`DtoRegistry`](crate::engine::DtoRegistry).
//!
//! ## Sources
//!
//! Values are read from a YAML file (conventionally `config/dto.yaml`) and then
//! overridden by environment variables. Missing keys keep their defaults.
//!
//! ```yaml
//! descriptor_cache_capacity: 500
//! boolean_true_values: ["1", "true", "on", "yes", 1, true]
//! strict_numbers: false
//! default_offset_seconds: 3600
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Field |
//! |----------|-------|
//! | `DTO_CACHE_CAPACITY` | `descriptor_cache_capacity` |
//! | `DTO_BOOLEAN_TRUE_VALUES` | `boolean_true_values`, comma separated |
//! | `DTO_STRICT_NUMBERS` | `strict_numbers` |
//! | `DTO_DEFAULT_OFFSET` | `default_offset_seconds` |
//!
//! Each boolean token is read as a JSON scalar when it parses as one, so
//! `DTO_BOOLEAN_TRUE_VALUES='"1",1,true,yes'` yields the string `"1"`, the
//! integer `1`, the boolean `true` and the string `"yes"`.

use crate::schema::DEFAULT_DESCRIPTOR_CAPACITY;
use crate::value::Value;
use anyhow::{Context, Result};
use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use std::env;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DtoConfig {
    /// Maximum number of cached type descriptors (default: 200)
    pub descriptor_cache_capacity: usize,
    /// Values the boolean converter treats as true, compared strictly
    pub boolean_true_values: Vec<JsonValue>,
    /// Reject non-numeric text in the int and float converters instead of reading it as zero
    pub strict_numbers: bool,
    /// UTC offset applied to date text without a zone (default: 0)
    pub default_offset_seconds: i32,
}

impl Default for DtoConfig {
    fn default() -> Self {
        Self {
            descriptor_cache_capacity: DEFAULT_DESCRIPTOR_CAPACITY,
            boolean_true_values: vec![json!("1"), json!("true"), json!("on"), json!(1), json!(true)],
            strict_numbers: false,
            default_offset_seconds: 0,
        }
    }
}

impl DtoConfig {
    /// Defaults overridden by `DTO_*` environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env(|key| env::var(key).ok());
        config
    }

    /// Read a YAML configuration file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_yaml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// The file at `path` when it exists, defaults otherwise, then environment overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            Self::from_yaml_file(path)?
        } else {
            Self::default()
        };
        config.apply_env(|key| env::var(key).ok());
        Ok(config)
    }

    /// Apply overrides from `lookup`, typically the process environment.
    /// Unparseable values are ignored with a warning.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("DTO_CACHE_CAPACITY") {
            match val.trim().parse() {
                Ok(capacity) => self.descriptor_cache_capacity = capacity,
                Err(_) => warn!(value = %val, "Ignoring invalid DTO_CACHE_CAPACITY"),
            }
        }
        if let Some(val) = lookup("DTO_BOOLEAN_TRUE_VALUES") {
            self.boolean_true_values = val
                .split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(|token| {
                    serde_json::from_str::<JsonValue>(token)
                        .ok()
                        .filter(|v| !v.is_object() && !v.is_array())
                        .unwrap_or_else(|| JsonValue::String(token.to_string()))
                })
                .collect();
        }
        if let Some(val) = lookup("DTO_STRICT_NUMBERS") {
            match val.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.strict_numbers = true,
                "0" | "false" | "no" | "off" => self.strict_numbers = false,
                _ => warn!(value = %val, "Ignoring invalid DTO_STRICT_NUMBERS"),
            }
        }
        if let Some(val) = lookup("DTO_DEFAULT_OFFSET") {
            match val.trim().parse() {
                Ok(seconds) => self.default_offset_seconds = seconds,
                Err(_) => warn!(value = %val, "Ignoring invalid DTO_DEFAULT_OFFSET"),
            }
        }
    }

    /// True tokens as engine values.
    pub fn boolean_tokens(&self) -> Vec<Value> {
        self.boolean_true_values
            .iter()
            .cloned()
            .map(Value::from)
            .collect()
    }

    /// Offset for zone-less dates; out-of-range settings fall back to UTC.
    pub fn default_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.default_offset_seconds).unwrap_or_else(|| {
            warn!(
                seconds = self.default_offset_seconds,
                "Default offset out of range, using UTC"
            );
            Utc.fix()
        })
    }
}
