//! Conversion settings loaded from a JSON file
//!
//! ```json
//! {
//!   "fields": [
//!     { "path": "user_id", "header": "User ID" },
//!     { "path": "created_at", "transform": "unix_timestamp" },
//!     { "path": "items[*].sku", "header": "SKU" }
//!   ],
//!   "delimiter": ";",
//!   "header": true
//! }
//! ```

use crate::error::{ConvertError, Result};
use crate::transforms;
use crate::types::{Field, Options, DEFAULT_DELIMITER};
use serde::Deserialize;
use std::path::Path;

/// One column as written in a configuration file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldConfig {
    pub path: String,

    /// Column name; defaults to the path
    #[serde(default)]
    pub header: Option<String>,

    /// Name of a built-in transform
    #[serde(default)]
    pub transform: Option<String>,
}

impl FieldConfig {
    /// Parse a command-line field of the form `PATH` or `PATH=HEADER`.
    pub fn parse_spec(spec: &str) -> Self {
        let (path, header) = match spec.split_once('=') {
            Some((path, header)) => (path.trim(), Some(header.trim().to_string())),
            None => (spec.trim(), None),
        };
        FieldConfig {
            path: path.to_string(),
            header,
            transform: None,
        }
    }

    pub fn into_field(self) -> Result<Field> {
        let header = self.header.unwrap_or_else(|| self.path.clone());
        let mut field = Field::new(self.path, header);

        if let Some(name) = self.transform {
            let transform = transforms::builtin(&name).ok_or_else(|| {
                ConvertError::UnknownTransform {
                    path: field.path.clone(),
                    name,
                }
            })?;
            field = field.with_transform(transform);
        }

        Ok(field)
    }
}

fn default_delimiter() -> char {
    DEFAULT_DELIMITER
}

fn default_header() -> bool {
    true
}

/// Complete conversion settings as written in a configuration file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConversionConfig {
    pub fields: Vec<FieldConfig>,

    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Whether to write a header row
    #[serde(default = "default_header")]
    pub header: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        ConversionConfig {
            fields: Vec::new(),
            delimiter: default_delimiter(),
            header: default_header(),
        }
    }
}

impl ConversionConfig {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConvertError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&text).map_err(|source| ConvertError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve transform names and build conversion options
    pub fn into_options(self) -> Result<Options> {
        let fields = self
            .fields
            .into_iter()
            .map(FieldConfig::into_field)
            .collect::<Result<Vec<_>>>()?;

        let mut options = Options::new(fields).with_delimiter(self.delimiter);
        if !self.header {
            options = options.without_header();
        }
        Ok(options)
    }
}
