use serde::{Deserialize, Serialize};

/// Snapshot of the tables reflected from one database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSchema {
    /// Contract version for this schema format.
    pub schema_version: String,
    /// Database engine identifier (e.g. `mysql`).
    pub engine: String,
    /// Database name when available.
    pub database: Option<String>,
    /// Tables and views, sorted by name.
    pub tables: Vec<Table>,
}

impl DatabaseSchema {
    /// Look up a table or view by name.
    ///
    /// MySQL table names are case-sensitive on most platforms, so the match is exact.
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|table| table.name == name)
    }
}

/// A table-like object (base table or view).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub kind: TableKind,
    pub comment: Option<String>,
    pub columns: Vec<Column>,
}

impl Table {
    /// Look up a column by name. Column names compare case-insensitively in MySQL.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|column| column.name.eq_ignore_ascii_case(name))
    }

    /// Column names in ordinal order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|column| column.name.as_str()).collect()
    }
}

/// Kind of table represented in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Table,
    View,
    Other(String),
}

/// Column metadata for a table-like object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    pub ordinal_position: u32,
    pub name: String,
    /// Bare type name (e.g. `smallint`).
    pub data_type: String,
    /// Full column type (e.g. `smallint unsigned`).
    pub column_type: String,
    pub is_nullable: bool,
    pub default: Option<String>,
    pub comment: Option<String>,
}
