//! Error types for JSON to CSV conversion.

use std::path::PathBuf;
use thiserror::Error;

/// Boxed error returned by field transforms.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Coarse classification of a [`ConvertError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The field list or options cannot drive a conversion.
    Configuration,
    /// The input is not a well-formed array of JSON objects.
    Format,
    /// The flatten array, or one of its elements, has the wrong JSON type.
    Shape,
    /// A field transform reported a failure.
    Transform,
    /// The CSV output could not be written.
    Output,
}

/// Errors that can occur while converting JSON records to CSV rows.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConvertError {
    /// No field path contains the `[*]` marker.
    #[error("no field path contains `[*]`; at least one field must name the array to flatten")]
    NoFlattenTarget,

    /// A field path has an empty segment such as `a..b`.
    #[error("invalid field path {path:?}: segment {segment} is empty")]
    InvalidPath { path: String, segment: usize },

    /// The delimiter cannot be used by the CSV writer.
    #[error("invalid delimiter {delimiter:?}: {reason}")]
    InvalidDelimiter {
        delimiter: char,
        reason: &'static str,
    },

    /// A configuration names a transform that does not exist.
    #[error("unknown transform {name:?} for field {path:?}")]
    UnknownTransform { path: String, name: String },

    /// Configuration file could not be read.
    #[error("failed to read configuration {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid JSON for the expected layout.
    #[error("failed to parse configuration {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The top-level JSON value is not an array.
    #[error("expected a JSON array at the top level: {source}")]
    NotArrayInput {
        #[source]
        source: serde_json::Error,
    },

    /// The input ended before the top-level array was closed.
    #[error("unexpected end of input before the closing `]`: {source}")]
    Truncated {
        #[source]
        source: serde_json::Error,
    },

    /// A record inside the top-level array could not be decoded.
    #[error("failed to decode record {index}: {source}")]
    Decode {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A record inside the top-level array is not a JSON object.
    #[error("record {index} is a JSON {found}, expected an object")]
    RecordNotObject { index: usize, found: &'static str },

    /// Something other than whitespace follows the closing `]`.
    #[error("unexpected data after the top-level array: {source}")]
    TrailingInput {
        #[source]
        source: serde_json::Error,
    },

    /// Reading the input failed before decoding started.
    #[error("failed to read input: {0}")]
    Read(#[source] std::io::Error),

    /// The flatten path resolved to something other than an array or null.
    #[error("value at flatten path {path:?} is a JSON {found}, expected an array or null")]
    NotAnArray { path: String, found: &'static str },

    /// An element of the flatten array is neither an object nor null.
    #[error("element {index} of array at {path:?} is a JSON {found}, expected an object or null")]
    ElementNotObject {
        path: String,
        index: usize,
        found: &'static str,
    },

    /// A field transform failed.
    #[error("failed to transform field {path:?}: {source}")]
    Transform {
        path: String,
        #[source]
        source: BoxError,
    },

    /// Writing CSV output failed.
    #[error("failed to {operation}: {source}")]
    Write {
        operation: &'static str,
        #[source]
        source: csv::Error,
    },
}

impl ConvertError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConvertError::NoFlattenTarget
            | ConvertError::InvalidPath { .. }
            | ConvertError::InvalidDelimiter { .. }
            | ConvertError::UnknownTransform { .. }
            | ConvertError::ConfigRead { .. }
            | ConvertError::ConfigParse { .. } => ErrorKind::Configuration,
            ConvertError::NotArrayInput { .. }
            | ConvertError::Truncated { .. }
            | ConvertError::Decode { .. }
            | ConvertError::RecordNotObject { .. }
            | ConvertError::TrailingInput { .. }
            | ConvertError::Read(_) => ErrorKind::Format,
            ConvertError::NotAnArray { .. } | ConvertError::ElementNotObject { .. } => {
                ErrorKind::Shape
            }
            ConvertError::Transform { .. } => ErrorKind::Transform,
            ConvertError::Write { .. } => ErrorKind::Output,
        }
    }
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;
