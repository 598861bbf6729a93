//! Dotted path resolution against decoded JSON values
//!
//! Missing keys and null or scalar intermediates are ordinary data, not
//! errors: they resolve to `None`. Only a malformed path (an empty segment)
//! is reported as an error.

use crate::error::{ConvertError, Result};
use crate::types::PATH_SEPARATOR;
use serde_json::Value;
use std::fmt;

/// Type identifier for JSON values, used in error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonType {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl JsonType {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => JsonType::Null,
            Value::Bool(_) => JsonType::Boolean,
            Value::Number(_) => JsonType::Number,
            Value::String(_) => JsonType::String,
            Value::Array(_) => JsonType::Array,
            Value::Object(_) => JsonType::Object,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JsonType::Null => "null",
            JsonType::Boolean => "boolean",
            JsonType::Number => "number",
            JsonType::String => "string",
            JsonType::Array => "array",
            JsonType::Object => "object",
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check that a non-empty path has no empty segments.
pub fn validate(path: &str) -> Result<()> {
    if path.is_empty() {
        return Ok(());
    }

    match path.split(PATH_SEPARATOR).position(str::is_empty) {
        Some(segment) => Err(ConvertError::InvalidPath {
            path: path.to_string(),
            segment,
        }),
        None => Ok(()),
    }
}

/// Resolve a dotted path against a JSON value.
///
/// An empty path returns the container itself. `Ok(None)` means the path
/// could not be followed to its end; `Ok(Some(Value::Null))` means it was
/// followed and the leaf is null. Both render as an empty cell.
pub fn resolve<'a>(container: &'a Value, path: &str) -> Result<Option<&'a Value>> {
    validate(path)?;

    if path.is_empty() {
        return Ok(Some(container));
    }

    let mut current = container;
    for key in path.split(PATH_SEPARATOR) {
        match current {
            Value::Object(map) => match map.get(key) {
                Some(next) => current = next,
                None => return Ok(None),
            },
            // null or scalar with segments left to walk
            _ => return Ok(None),
        }
    }

    Ok(Some(current))
}
