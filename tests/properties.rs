//! Property-based tests for flattening and rendering.
//!
//! Tests invariants like:
//! - conversions without a `[*]` field never produce output
//! - record-level fields repeat unchanged on every row of a record
//! - missing keys and null intermediates render the same
//! - numbers render with the fewest digits that read back exactly

use proptest::prelude::*;
use serde_json::{json, Value};
use tabulate::{convert, render_value, ConvertError, Field, Flattener, Options};

fn key() -> impl Strategy<Value = String> {
    "[a-z]{1,6}"
}

/// Dotted paths without an array marker
fn plain_path() -> impl Strategy<Value = String> {
    prop::collection::vec(key(), 1..4).prop_map(|keys| keys.join("."))
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[ -~]{0,12}".prop_map(Value::from),
    ]
}

proptest! {
    #[test]
    fn prop_no_marker_is_configuration_error(paths in prop::collection::vec(plain_path(), 0..6)) {
        let options = Options::new(paths.iter().map(|p| Field::new(p.as_str(), p.as_str())).collect());
        let mut output = Vec::new();

        let result = convert(&b"[{\"a\": 1}]"[..], &mut output, &options);

        prop_assert!(matches!(result, Err(ConvertError::NoFlattenTarget)));
        prop_assert!(output.is_empty());
    }

    #[test]
    fn prop_record_fields_repeat_on_every_row(
        id in scalar(),
        name in scalar(),
        values in prop::collection::vec(scalar(), 0..8),
    ) {
        let items: Vec<Value> = values.iter().map(|v| json!({"v": v})).collect();
        let record = json!({"id": id, "meta": {"name": name}, "items": items});
        let fields = vec![
            Field::new("id", "id"),
            Field::new("items[*].v", "v"),
            Field::new("meta.name", "name"),
        ];

        let rows = Flattener::from_fields(&fields).unwrap().rows(&record).unwrap();

        prop_assert_eq!(rows.len(), values.len());
        for (row, value) in rows.iter().zip(&values) {
            prop_assert_eq!(&row[0], &render_value(&id));
            prop_assert_eq!(&row[1], &render_value(value));
            prop_assert_eq!(&row[2], &render_value(&name));
        }
    }

    #[test]
    fn prop_null_only_arrays_yield_no_rows(count in 0usize..10) {
        let record = json!({"items": vec![Value::Null; count]});
        let flattener = Flattener::from_fields(&[Field::new("items[*].x", "x")]).unwrap();

        prop_assert!(flattener.rows(&record).unwrap().is_empty());
    }

    #[test]
    fn prop_missing_and_null_intermediate_render_alike(parent in key(), child in key()) {
        prop_assume!(parent != "items");
        let path = format!("{parent}.{child}");
        let fields = vec![Field::new(path.as_str(), "value"), Field::new("items[*]", "item")];
        let flattener = Flattener::from_fields(&fields).unwrap();

        let mut missing = serde_json::Map::new();
        missing.insert("items".to_string(), json!([{}]));
        let mut with_null = missing.clone();
        with_null.insert(parent.clone(), Value::Null);

        let missing_rows = flattener.rows(&Value::Object(missing)).unwrap();
        let null_rows = flattener.rows(&Value::Object(with_null)).unwrap();

        prop_assert_eq!(&missing_rows[0][0], "");
        prop_assert_eq!(missing_rows, null_rows);
    }

    #[test]
    fn prop_integers_render_without_decimal_point(n in any::<i64>()) {
        let text = render_value(&Value::from(n));

        prop_assert!(!text.contains('.'));
        prop_assert_eq!(text.parse::<i64>().unwrap(), n);
    }

    #[test]
    fn prop_floats_round_trip(f in any::<f64>().prop_filter("finite", |f| f.is_finite())) {
        let text = render_value(&Value::from(f));

        prop_assert_eq!(text.parse::<f64>().unwrap(), f);
        if f.fract() == 0.0 {
            prop_assert!(!text.contains('.'), "{} rendered as {}", f, text);
        }
    }
}
