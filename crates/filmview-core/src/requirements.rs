//! Checks that a reflected schema contains what the view query reads.

use crate::error::{Error, Result};
use crate::schema::DatabaseSchema;

/// A table that must exist along with the columns read from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRequirement {
    pub table: String,
    pub columns: Vec<String>,
}

impl TableRequirement {
    pub fn new(table: &str, columns: &[&str]) -> Self {
        Self {
            table: table.to_string(),
            columns: columns.iter().map(|column| column.to_string()).collect(),
        }
    }
}

/// Tables and columns read by [`crate::top_rented_films_query`].
pub fn top_rented_films_requirements() -> Vec<TableRequirement> {
    vec![
        TableRequirement::new("rental", &["inventory_id"]),
        TableRequirement::new("inventory", &["inventory_id", "film_id"]),
        TableRequirement::new("film", &["film_id", "title"]),
    ]
}

/// Fail on the first required table or column absent from `schema`.
pub fn check_requirements(schema: &DatabaseSchema, requirements: &[TableRequirement]) -> Result<()> {
    for requirement in requirements {
        let table = schema
            .table(&requirement.table)
            .ok_or_else(|| Error::MissingTable(requirement.table.clone()))?;

        for column in &requirement.columns {
            if table.column(column).is_none() {
                return Err(Error::MissingColumn {
                    table: requirement.table.clone(),
                    column: column.clone(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Column, Table, TableKind};

    fn table(name: &str, columns: &[&str]) -> Table {
        Table {
            name: name.to_string(),
            kind: TableKind::Table,
            comment: None,
            columns: columns
                .iter()
                .enumerate()
                .map(|(idx, column)| Column {
                    ordinal_position: idx as u32 + 1,
                    name: column.to_string(),
                    data_type: "int".to_string(),
                    column_type: "int".to_string(),
                    is_nullable: false,
                    default: None,
                    comment: None,
                })
                .collect(),
        }
    }

    fn sakila(tables: Vec<Table>) -> DatabaseSchema {
        DatabaseSchema {
            schema_version: crate::SCHEMA_VERSION.to_string(),
            engine: "mysql".to_string(),
            database: Some("sakila".to_string()),
            tables,
        }
    }

    #[test]
    fn passes_on_complete_schema() {
        let schema = sakila(vec![
            table("film", &["film_id", "title", "release_year"]),
            table("inventory", &["inventory_id", "film_id", "store_id"]),
            table("rental", &["rental_id", "inventory_id", "customer_id"]),
        ]);
        check_requirements(&schema, &top_rented_films_requirements()).unwrap();
    }

    #[test]
    fn reports_missing_table() {
        let schema = sakila(vec![
            table("film", &["film_id", "title"]),
            table("inventory", &["inventory_id", "film_id"]),
        ]);
        let err = check_requirements(&schema, &top_rented_films_requirements()).unwrap_err();
        assert!(matches!(err, Error::MissingTable(ref name) if name == "rental"));
    }

    #[test]
    fn reports_each_missing_source_table() {
        let full = || {
            vec![
                table("film", &["film_id", "title"]),
                table("inventory", &["inventory_id", "film_id"]),
                table("rental", &["inventory_id"]),
            ]
        };
        for missing in ["film", "inventory"] {
            let tables = full()
                .into_iter()
                .filter(|table| table.name != missing)
                .collect();
            let err = check_requirements(&sakila(tables), &top_rented_films_requirements())
                .unwrap_err();
            assert!(
                matches!(err, Error::MissingTable(ref name) if name == missing),
                "expected {missing} to be reported, got {err}"
            );
        }
    }

    #[test]
    fn empty_schema_reports_first_required_table() {
        let err = check_requirements(&sakila(Vec::new()), &top_rented_films_requirements())
            .unwrap_err();
        assert!(matches!(err, Error::MissingTable(ref name) if name == "rental"));
    }

    #[test]
    fn reports_missing_column() {
        let schema = sakila(vec![
            table("film", &["film_id"]),
            table("inventory", &["inventory_id", "film_id"]),
            table("rental", &["inventory_id"]),
        ]);
        let err = check_requirements(&schema, &top_rented_films_requirements()).unwrap_err();
        assert_eq!(err.to_string(), "missing column: film.title");
    }

    #[test]
    fn column_lookup_ignores_case() {
        let schema = sakila(vec![
            table("film", &["FILM_ID", "Title"]),
            table("inventory", &["inventory_id", "film_id"]),
            table("rental", &["inventory_id"]),
        ]);
        assert!(check_requirements(&schema, &top_rented_films_requirements()).is_ok());
    }
}
