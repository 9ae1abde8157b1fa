use filmview_core::{Column, DatabaseSchema, Table, TableKind, SCHEMA_VERSION};

fn snapshot() -> DatabaseSchema {
    DatabaseSchema {
        schema_version: SCHEMA_VERSION.to_string(),
        engine: "mysql".to_string(),
        database: Some("sakila".to_string()),
        tables: vec![Table {
            name: "top_rented_films".to_string(),
            kind: TableKind::View,
            comment: None,
            columns: vec![Column {
                ordinal_position: 1,
                name: "title".to_string(),
                data_type: "varchar".to_string(),
                column_type: "varchar(128)".to_string(),
                is_nullable: false,
                default: None,
                comment: None,
            }],
        }],
    }
}

#[test]
fn serializes_schema_deterministically() {
    let json = serde_json::to_string_pretty(&snapshot()).expect("serialize schema");
    let expected = r#"{
  "schema_version": "0.1",
  "engine": "mysql",
  "database": "sakila",
  "tables": [
    {
      "name": "top_rented_films",
      "kind": "view",
      "comment": null,
      "columns": [
        {
          "ordinal_position": 1,
          "name": "title",
          "data_type": "varchar",
          "column_type": "varchar(128)",
          "is_nullable": false,
          "default": null,
          "comment": null
        }
      ]
    }
  ]
}"#;
    assert_eq!(json, expected);
}

#[test]
fn round_trips_through_json() {
    let json = serde_json::to_string(&snapshot()).expect("serialize schema");
    let parsed: DatabaseSchema = serde_json::from_str(&json).expect("parse schema");
    let view = parsed.table("top_rented_films").expect("view present");
    assert_eq!(view.kind, TableKind::View);
    assert_eq!(view.column_names(), vec!["title"]);
}
