//! Ready-made field transforms
//!
//! Each function returns a [`Transform`] that can be attached to a field
//! with [`Field::with_transform`](crate::Field::with_transform), or looked
//! up by name from a configuration file with [`builtin`].

use crate::error::BoxError;
use crate::flatten::{render_value, JsonType};
use crate::types::Transform;
use chrono::DateTime;
use serde_json::Value;

/// Format used by [`unix_timestamp`]
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Booleans become `Yes` / `No`; null becomes empty; anything else passes through.
pub fn bool_to_yes_no() -> Transform {
    Transform::new(|value, _| {
        Ok(match value {
            Value::Null => Value::String(String::new()),
            Value::Bool(true) => Value::String("Yes".to_string()),
            Value::Bool(false) => Value::String("No".to_string()),
            other => other.clone(),
        })
    })
}

/// Whole seconds since the Unix epoch become `YYYY-MM-DD HH:MM:SS` (UTC).
///
/// Null becomes empty. Fractional numbers, out-of-range values and
/// non-numbers are errors.
pub fn unix_timestamp() -> Transform {
    Transform::new(|value, _| format_unix_timestamp(value))
}

fn format_unix_timestamp(value: &Value) -> Result<Value, BoxError> {
    let seconds = match value {
        Value::Null => return Ok(Value::String(String::new())),
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| format!("cannot convert {n} to whole seconds"))?,
        other => {
            return Err(format!(
                "unsupported JSON {} for timestamp",
                JsonType::of(other)
            )
            .into())
        }
    };

    let time = DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| format!("timestamp {seconds} is out of range"))?;
    Ok(Value::String(time.format(TIMESTAMP_FORMAT).to_string()))
}

/// Summarize an array by size: `Null Array`, `Empty Array`, or `N Items`.
pub fn items_summary() -> Transform {
    Transform::new(|value, _| {
        let summary = match value {
            Value::Null => "Null Array".to_string(),
            Value::Array(items) if items.is_empty() => "Empty Array".to_string(),
            Value::Array(items) => format!("{} Items", items.len()),
            other => format!("Unexpected Type: {}", JsonType::of(other)),
        };
        Ok(Value::String(summary))
    })
}

/// Join the elements of an array into one cell with `separator`.
///
/// Anything that is not an array becomes empty.
pub fn join_with(separator: impl Into<String>) -> Transform {
    let separator = separator.into();
    Transform::new(move |value, _| {
        let joined = match value {
            Value::Array(items) => items
                .iter()
                .map(render_value)
                .collect::<Vec<_>>()
                .join(&separator),
            _ => String::new(),
        };
        Ok(Value::String(joined))
    })
}

/// Look up a transform by the name used in configuration files.
pub fn builtin(name: &str) -> Option<Transform> {
    match name {
        "yes_no" => Some(bool_to_yes_no()),
        "unix_timestamp" => Some(unix_timestamp()),
        "items_summary" => Some(items_summary()),
        "join" => Some(join_with(";")),
        _ => None,
    }
}
