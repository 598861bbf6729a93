//! # Tabulate - JSON array flattening to CSV
//!
//! Converts a JSON array of objects into CSV, expanding one nested array
//! per object so that every array element becomes its own row. Fields of
//! the enclosing object are repeated on each row generated from it.
//!
//! ## Modules
//!
//! - **flatten**: path resolution, flatten plans and row materialization
//! - **convert**: the streaming read / flatten / write loop
//! - **transforms**: ready-made per-field value transforms
//! - **config**: conversion settings loaded from JSON files
//!
//! ## Field paths
//!
//! Paths are dot-separated keys. The first field whose path contains `[*]`
//! names the array to flatten: `items[*].sku` reads `sku` from each element
//! of `items`, while `user.name` reads from the enclosing object.
//!
//! ## Quick Start
//!
//! ```rust
//! use tabulate::{convert, Field, Options};
//!
//! # fn main() -> anyhow::Result<()> {
//! let input = r#"[{"id": 1, "items": [{"sku": "A"}, {"sku": "B"}]}]"#;
//! let options = Options::new(vec![
//!     Field::new("id", "Order"),
//!     Field::new("items[*].sku", "SKU"),
//! ]);
//!
//! let mut output = Vec::new();
//! let summary = convert(input.as_bytes(), &mut output, &options)?;
//!
//! assert_eq!(String::from_utf8(output)?, "Order,SKU\n1,A\n1,B\n");
//! assert_eq!(summary.rows, 2);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod convert;
pub mod error;
pub mod flatten;
pub mod transforms;
pub mod types;

// Re-export commonly used types for convenience
pub use config::{ConversionConfig, FieldConfig};
pub use convert::{convert, Converter, Summary};
pub use error::{BoxError, ConvertError, ErrorKind, Result};
pub use flatten::{detect_array_path, render_value, resolve, FlattenPlan, Flattener, Row};
pub use types::{Field, Options, Transform, ARRAY_MARKER, DEFAULT_DELIMITER};
