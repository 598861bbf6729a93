//! Row materialization using a pre-computed [`FlattenPlan`]

use crate::error::{ConvertError, Result};
use crate::flatten::path::{self, JsonType};
use crate::flatten::plan::{ColumnPlan, ColumnSource, FlattenPlan};
use crate::types::Field;
use serde_json::{Number, Value};

/// One output row, one cell per configured field
pub type Row = Vec<String>;

static NULL: Value = Value::Null;

/// Turns source records into CSV rows, one per element of the flatten array
#[derive(Debug, Clone)]
pub struct Flattener {
    plan: FlattenPlan,
}

impl Flattener {
    pub fn new(plan: FlattenPlan) -> Self {
        Flattener { plan }
    }

    /// Build a flattener straight from a field list
    pub fn from_fields(fields: &[Field]) -> Result<Self> {
        Ok(Self::new(FlattenPlan::from_fields(fields)?))
    }

    pub fn plan(&self) -> &FlattenPlan {
        &self.plan
    }

    pub fn header(&self) -> Vec<String> {
        self.plan.header()
    }

    /// Materialize all rows for one record.
    ///
    /// A missing or null flatten array yields no rows. Elements are checked
    /// before any row is built, so a bad element fails the whole record.
    pub fn rows(&self, record: &Value) -> Result<Vec<Row>> {
        let array_path = &self.plan.array_path;

        let items = match path::resolve(record, array_path)? {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(ConvertError::NotAnArray {
                    path: array_path.clone(),
                    found: JsonType::of(other).as_str(),
                })
            }
        };

        let mut elements = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match item {
                Value::Null => continue,
                Value::Object(_) => elements.push(item),
                _ if self.plan.whole_elements => elements.push(item),
                other => {
                    return Err(ConvertError::ElementNotObject {
                        path: array_path.clone(),
                        index,
                        found: JsonType::of(other).as_str(),
                    })
                }
            }
        }

        elements
            .into_iter()
            .map(|element| self.row(record, element))
            .collect()
    }

    fn row(&self, record: &Value, element: &Value) -> Result<Row> {
        self.plan
            .columns
            .iter()
            .map(|column| cell(column, record, element))
            .collect()
    }
}

fn cell(column: &ColumnPlan, record: &Value, element: &Value) -> Result<String> {
    let resolved = match &column.source {
        ColumnSource::Record(p) => path::resolve(record, p)?,
        ColumnSource::Element(p) => path::resolve(element, p)?,
    };
    let value = resolved.unwrap_or(&NULL);

    match &column.transform {
        Some(transform) => {
            let transformed = transform
                .apply(value, record)
                .map_err(|source| ConvertError::Transform {
                    path: column.path.clone(),
                    source,
                })?;
            Ok(render_value(&transformed))
        }
        None => Ok(render_value(value)),
    }
}

/// Render a JSON value as CSV cell text.
///
/// Null is empty, strings are written as-is, numbers use the shortest
/// text that reads back to the same value, and arrays or objects fall back
/// to compact JSON.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => render_number(n),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn render_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        let literal = n.to_string();
        if !literal.contains(['.', 'e', 'E']) {
            // integer beyond 64 bits, kept as written
            return literal;
        }
        // f64 Display is shortest round-trip and drops a `.0` suffix;
        // values beyond f64 range keep their literal text
        n.as_f64().map_or(literal, |f| f.to_string())
    }
}
