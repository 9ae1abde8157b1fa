//! Core contracts and helpers for filmview.
//!
//! This crate defines the reflected schema model, the SQL builder used to
//! generate the view DDL, the checks run against a reflected schema, and the
//! row values read back from a view.

pub mod error;
pub mod redaction;
pub mod requirements;
pub mod schema;
pub mod sql;
pub mod validation;
pub mod value;

pub use error::{Error, Result};
pub use redaction::{redact_connection_string, RedactedConnection};
pub use requirements::{check_requirements, top_rented_films_requirements, TableRequirement};
pub use schema::{Column, DatabaseSchema, Table, TableKind};
pub use sql::{
    top_rented_films_query, top_rented_films_view, ColumnRef, CreateView, Expr, Ident, Order,
    Select, DEFAULT_VIEW_LIMIT, DEFAULT_VIEW_NAME,
};
pub use validation::validate_schema;
pub use value::{TopRentedFilm, Value, ViewRow};

/// Current contract version for serialized schema snapshots.
pub const SCHEMA_VERSION: &str = "0.1";
