/// Quickstart example - flatten each user's items into CSV rows
use serde_json::Value;
use tabulate::{convert, transforms, Field, Options, Transform};

fn main() -> anyhow::Result<()> {
    println!("=== Tabulate Quick Start ===\n");

    // Step 1: A JSON array of users, each holding an `items` array
    let input = r#"
    [
      {
        "user_id": 101,
        "user_name": "Alice Smith",
        "is_active": true,
        "address": {"city": "New York", "zip": "10001"},
        "items": [
          {"item_id": "A1", "price": 10.50, "quantity": 1, "tags": ["electronics"]},
          {"item_id": "B2", "price": 5.00, "quantity": 3, "tags": ["book", "fiction"]}
        ],
        "created_at": 1678886400
      },
      {
        "user_id": 102,
        "user_name": "Bob Johnson",
        "is_active": false,
        "address": {"city": "London", "zip": "SW1A 0AA"},
        "items": [
          {"item_id": "C3", "price": 2.20, "quantity": 5, "tags": ["stationery"]}
        ],
        "created_at": 1678972800
      },
      {"user_id": 103, "user_name": "Charlie Brown", "address": null, "items": []},
      {"user_id": 104, "user_name": "David Lee", "items": null}
    ]"#;

    // Step 2: Columns. User fields repeat on every row; `items[*]` fields
    // come from one element each.
    let options = Options::new(vec![
        Field::new("user_id", "User ID"),
        Field::new("user_name", "User Name"),
        Field::new("is_active", "Active").with_transform(transforms::bool_to_yes_no()),
        Field::new("address.city", "City"),
        Field::new("created_at", "Created At").with_transform(transforms::unix_timestamp()),
        Field::new("items[*].item_id", "Item ID"),
        Field::new("items[*].price", "Item Price"),
        Field::new("items[*].quantity", "Quantity"),
        Field::new("items[*].tags", "Item Tags").with_transform(transforms::join_with(";")),
        // Transforms also see the whole record
        Field::new("items[*].quantity", "Line Label").with_transform(Transform::new(
            |quantity, record| {
                let name = record["user_name"].as_str().unwrap_or("unknown");
                Ok(Value::String(format!("{name} x{quantity}")))
            },
        )),
    ]);

    // Step 3: Convert
    let mut output = Vec::new();
    let summary = convert(input.as_bytes(), &mut output, &options)?;

    println!("{}", String::from_utf8(output)?);
    println!(
        "✓ {} records, {} rows, {} records without items",
        summary.records, summary.rows, summary.skipped_records
    );

    Ok(())
}
