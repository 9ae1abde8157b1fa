//! Database introspection adapters.

pub mod adapter;
pub mod mysql;
pub mod options;

pub use adapter::Adapter;
pub use mysql::{introspect_mysql, reflect_table, MySqlAdapter};
pub use options::IntrospectOptions;

pub use filmview_core::DatabaseSchema;
