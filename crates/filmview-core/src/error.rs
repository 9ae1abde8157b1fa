use thiserror::Error;

/// Core error type shared across filmview crates.
#[derive(Debug, Error)]
pub enum Error {
    /// Database error or adapter failure.
    #[error("database error: {0}")]
    Db(String),
    /// A table or view the run depends on does not exist.
    #[error("missing table: {0}")]
    MissingTable(String),
    /// A table exists but lacks a column the run depends on.
    #[error("missing column: {table}.{column}")]
    MissingColumn { table: String, column: String },
    /// The schema violates internal invariants.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
    /// A name cannot be used as a SQL identifier.
    #[error("invalid identifier {name:?}: {reason}")]
    InvalidIdentifier { name: String, reason: &'static str },
    /// A query cannot be rendered (e.g. it has no FROM clause).
    #[error("invalid query: {0}")]
    InvalidQuery(String),
    /// A value read back from the database could not be interpreted.
    #[error("decode error: {0}")]
    Decode(String),
}

/// Convenience alias for results returned by filmview crates.
pub type Result<T> = std::result::Result<T, Error>;
