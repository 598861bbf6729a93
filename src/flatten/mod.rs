//! Path resolution and array flattening
//!
//! A [`FlattenPlan`] is computed once from the field list; a [`Flattener`]
//! then turns every source record into one row per element of the
//! flatten array, repeating record-level fields on each row.

pub mod materialize;
pub mod path;
pub mod plan;
pub mod writer;

pub use materialize::{render_value, Flattener, Row};
pub use path::{resolve, JsonType};
pub use plan::{detect_array_path, ColumnPlan, ColumnSource, FlattenPlan};
pub use writer::RowWriter;
