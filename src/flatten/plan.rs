//! Flatten plans computed once per conversion run
//!
//! The plan fixes which array is flattened and, for every output column,
//! whether its value comes from the record or from the current array
//! element. Records are then materialized without re-parsing field paths.

use crate::error::{ConvertError, Result};
use crate::flatten::path;
use crate::types::{Field, Transform, ARRAY_MARKER, PATH_SEPARATOR};

/// Where a column reads its value from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSource {
    /// Path resolved against the whole record; same value on every row
    Record(String),
    /// Path resolved against one array element; empty means the element itself
    Element(String),
}

/// Pre-computed extraction rule for one output column
#[derive(Debug, Clone)]
pub struct ColumnPlan {
    /// The field path as configured, used in error messages
    pub path: String,

    pub header: String,

    pub source: ColumnSource,

    pub transform: Option<Transform>,
}

/// Complete flattening plan derived from the field list
#[derive(Debug, Clone)]
pub struct FlattenPlan {
    /// Path of the array whose elements become rows
    pub array_path: String,

    /// Columns in output order
    pub columns: Vec<ColumnPlan>,

    /// Every element column addresses the element itself (`items[*]`),
    /// so elements may be scalars rather than objects.
    pub whole_elements: bool,
}

/// Find the array to flatten from the first field whose path contains `[*]`.
///
/// Returns the text before the marker without one trailing separator, or
/// an empty string when no field has a marker. Later fields are not
/// consulted, even if they name a different array.
pub fn detect_array_path(fields: &[Field]) -> &str {
    for field in fields {
        if let Some(index) = field.marker_index() {
            let base = &field.path[..index];
            return base.strip_suffix(PATH_SEPARATOR).unwrap_or(base);
        }
    }
    ""
}

/// Path within an array element addressed by a marker field, i.e. the text
/// after the first `[*]` without one leading separator.
fn element_path(path: &str, marker: usize) -> &str {
    let rest = &path[marker + ARRAY_MARKER.len()..];
    rest.strip_prefix(PATH_SEPARATOR).unwrap_or(rest)
}

impl FlattenPlan {
    /// Build a plan for the given fields.
    ///
    /// Fails when no field names an array to flatten, or when any path is
    /// malformed, so configuration problems surface before input is read.
    pub fn from_fields(fields: &[Field]) -> Result<Self> {
        let array_path = detect_array_path(fields);
        if array_path.is_empty() {
            return Err(ConvertError::NoFlattenTarget);
        }
        path::validate(array_path).map_err(|err| {
            fields
                .iter()
                .find(|field| field.marker_index().is_some())
                .map_or(err, |field| invalid_field_path(&field.path))
        })?;

        let mut columns = Vec::with_capacity(fields.len());
        for field in fields {
            let source = match field.marker_index() {
                Some(marker) => ColumnSource::Element(element_path(&field.path, marker).to_string()),
                None => ColumnSource::Record(field.path.clone()),
            };

            let (ColumnSource::Record(p) | ColumnSource::Element(p)) = &source;
            path::validate(p).map_err(|_| invalid_field_path(&field.path))?;

            columns.push(ColumnPlan {
                path: field.path.clone(),
                header: field.header.clone(),
                source,
                transform: field.transform.clone(),
            });
        }

        let whole_elements = columns
            .iter()
            .filter_map(|column| match &column.source {
                ColumnSource::Element(p) => Some(p),
                ColumnSource::Record(_) => None,
            })
            .all(String::is_empty);

        Ok(FlattenPlan {
            array_path: array_path.to_string(),
            columns,
            whole_elements,
        })
    }

    /// Header row: column names in declaration order
    pub fn header(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.header.clone()).collect()
    }
}

/// Report an invalid sub-path against the full configured path.
fn invalid_field_path(path: &str) -> ConvertError {
    let segment = path
        .split(PATH_SEPARATOR)
        .position(str::is_empty)
        .unwrap_or(0);
    ConvertError::InvalidPath {
        path: path.to_string(),
        segment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(paths: &[&str]) -> Vec<Field> {
        paths.iter().map(|p| Field::new(*p, p.to_uppercase())).collect()
    }

    #[test]
    fn test_detect_array_path() {
        assert_eq!(detect_array_path(&fields(&["id", "items[*].name"])), "items");
        assert_eq!(detect_array_path(&fields(&["order.lines[*]"])), "order.lines");
        assert_eq!(detect_array_path(&fields(&["items.[*].name"])), "items");
        assert_eq!(detect_array_path(&fields(&["id", "name"])), "");
        assert_eq!(detect_array_path(&[]), "");
    }

    #[test]
    fn test_detect_first_match_wins() {
        let fields = fields(&["id", "items[*].a", "other[*].b"]);
        assert_eq!(detect_array_path(&fields), "items");
    }

    #[test]
    fn test_plan_requires_marker() {
        let err = FlattenPlan::from_fields(&fields(&["id", "name"])).unwrap_err();
        assert!(matches!(err, ConvertError::NoFlattenTarget));

        // marker with nothing before it names no array
        let err = FlattenPlan::from_fields(&fields(&["[*].name"])).unwrap_err();
        assert!(matches!(err, ConvertError::NoFlattenTarget));
    }

    #[test]
    fn test_plan_columns() {
        let plan =
            FlattenPlan::from_fields(&fields(&["id", "user.name", "items[*].sku", "items[*]"]))
                .unwrap();

        assert_eq!(plan.array_path, "items");
        assert_eq!(plan.columns[0].source, ColumnSource::Record("id".into()));
        assert_eq!(plan.columns[1].source, ColumnSource::Record("user.name".into()));
        assert_eq!(plan.columns[2].source, ColumnSource::Element("sku".into()));
        assert_eq!(plan.columns[3].source, ColumnSource::Element(String::new()));
        assert!(!plan.whole_elements);
        assert_eq!(plan.header(), vec!["ID", "USER.NAME", "ITEMS[*].SKU", "ITEMS[*]"]);
    }

    #[test]
    fn test_plan_whole_elements() {
        let plan = FlattenPlan::from_fields(&fields(&["id", "tags[*]"])).unwrap();
        assert!(plan.whole_elements);
    }

    #[test]
    fn test_plan_rejects_malformed_paths() {
        for bad in [
            vec!["items[*].a..b"],
            vec!["items[*]..b"],
            vec!["items[*].a", "user..name"],
            vec!["a..items[*].x"],
        ] {
            let err = FlattenPlan::from_fields(&fields(&bad)).unwrap_err();
            assert!(
                matches!(err, ConvertError::InvalidPath { .. }),
                "{bad:?}: {err}"
            );
        }
    }

    #[test]
    fn test_invalid_array_path_reports_configured_path() {
        match FlattenPlan::from_fields(&fields(&["id", "items..[*].x"])).unwrap_err() {
            ConvertError::InvalidPath { path, segment } => {
                assert_eq!(path, "items..[*].x");
                assert_eq!(segment, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_element_path_reports_configured_path() {
        match FlattenPlan::from_fields(&fields(&["items[*]..b"])).unwrap_err() {
            ConvertError::InvalidPath { path, .. } => assert_eq!(path, "items[*]..b"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
