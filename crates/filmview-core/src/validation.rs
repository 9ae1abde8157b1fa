use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::schema::DatabaseSchema;

/// Validate internal consistency of a reflected schema.
///
/// This checks:
/// - duplicate table names
/// - duplicate column names within a table (case-insensitive)
/// - tables reflected without any columns
pub fn validate_schema(schema: &DatabaseSchema) -> Result<()> {
    let mut tables = BTreeSet::new();

    for table in &schema.tables {
        if !tables.insert(table.name.as_str()) {
            return Err(Error::InvalidSchema(format!(
                "duplicate table name: {}",
                table.name
            )));
        }

        if table.columns.is_empty() {
            return Err(Error::InvalidSchema(format!(
                "table has no columns: {}",
                table.name
            )));
        }

        let mut columns = BTreeSet::new();
        for column in &table.columns {
            if !columns.insert(column.name.to_ascii_lowercase()) {
                return Err(Error::InvalidSchema(format!(
                    "duplicate column name: {}.{}",
                    table.name, column.name
                )));
            }
        }
    }

    Ok(())
}
