use crate::error::BoxError;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Token marking the array to flatten inside a field path, e.g. `items[*].id`.
pub const ARRAY_MARKER: &str = "[*]";

/// Separator between path segments.
pub const PATH_SEPARATOR: char = '.';

/// Delimiter used when none is configured.
pub const DEFAULT_DELIMITER: char = ',';

type TransformFn = dyn Fn(&Value, &Value) -> Result<Value, BoxError> + Send + Sync;

/// A per-field value transform.
///
/// Called with the resolved value (`null` when the path did not resolve)
/// and the full source record the row was flattened from, whether the
/// field is record- or element-scoped.
#[derive(Clone)]
pub struct Transform(Arc<TransformFn>);

impl Transform {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value, &Value) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        Transform(Arc::new(f))
    }

    pub fn apply(&self, value: &Value, record: &Value) -> Result<Value, BoxError> {
        (self.0)(value, record)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Transform(..)")
    }
}

/// One output column: where its value comes from and what it is called.
#[derive(Debug, Clone)]
pub struct Field {
    /// Dotted path into the record. `[*]` marks the array to flatten;
    /// the part after it addresses a field inside one array element.
    pub path: String,

    /// Column name written in the header row
    pub header: String,

    /// Optional transform applied before rendering
    pub transform: Option<Transform>,
}

impl Field {
    pub fn new(path: impl Into<String>, header: impl Into<String>) -> Self {
        Field {
            path: path.into(),
            header: header.into(),
            transform: None,
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Position of the first array marker in the path, if any
    pub fn marker_index(&self) -> Option<usize> {
        self.path.find(ARRAY_MARKER)
    }
}

/// Configuration for a conversion run
#[derive(Debug, Clone)]
pub struct Options {
    /// Ordered output columns
    pub fields: Vec<Field>,

    /// Field delimiter for the CSV output
    pub delimiter: char,

    /// Whether to write a header row of field names
    pub header: bool,
}

impl Options {
    pub fn new(fields: Vec<Field>) -> Self {
        Options {
            fields,
            ..Options::default()
        }
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn without_header(mut self) -> Self {
        self.header = false;
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Options {
            fields: Vec::new(),
            delimiter: DEFAULT_DELIMITER,
            header: true,
        }
    }
}
