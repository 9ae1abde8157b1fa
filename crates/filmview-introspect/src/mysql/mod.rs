use sqlx::MySqlConnection;

use filmview_core::{DatabaseSchema, Error, Result, Table, SCHEMA_VERSION};

use crate::adapter::Adapter;
use crate::options::IntrospectOptions;

mod mapper;
mod queries;

/// Adapter for MySQL-compatible databases, bound to one open connection.
#[derive(Debug)]
pub struct MySqlAdapter {
    conn: MySqlConnection,
}

impl MySqlAdapter {
    pub fn new(conn: MySqlConnection) -> Self {
        Self { conn }
    }

    /// Give the connection back, e.g. to close it explicitly.
    pub fn into_inner(self) -> MySqlConnection {
        self.conn
    }
}

#[async_trait::async_trait]
impl Adapter for MySqlAdapter {
    fn engine(&self) -> &'static str {
        "mysql"
    }

    async fn introspect(&mut self, opts: &IntrospectOptions) -> Result<DatabaseSchema> {
        introspect_mysql(&mut self.conn, opts).await
    }
}

/// Introspect the connection's current database.
pub async fn introspect_mysql(
    conn: &mut MySqlConnection,
    opts: &IntrospectOptions,
) -> Result<DatabaseSchema> {
    let database = queries::fetch_database_name(conn).await?;
    if database.is_none() {
        return Err(Error::InvalidSchema(
            "connection has no default database selected".to_string(),
        ));
    }

    let mut tables = mapper::map_tables(queries::list_tables(conn).await?, opts);

    for table in &mut tables {
        let raw_columns = queries::list_columns(conn, &table.name).await?;
        table.columns = mapper::map_columns(raw_columns, opts);
    }

    tables.sort_by(|left, right| left.name.cmp(&right.name));

    tracing::debug!(
        event = "introspection_finished",
        database = database.as_deref().unwrap_or_default(),
        tables = tables.len()
    );

    Ok(DatabaseSchema {
        schema_version: SCHEMA_VERSION.to_string(),
        engine: "mysql".to_string(),
        database,
        tables,
    })
}

/// Reflect a single table or view by name.
pub async fn reflect_table(conn: &mut MySqlConnection, name: &str) -> Result<Table> {
    let raw = queries::find_table(conn, name)
        .await?
        .ok_or_else(|| Error::MissingTable(name.to_string()))?;

    let opts = IntrospectOptions::default();
    let mut table = mapper::map_table(raw, &opts);
    table.columns = mapper::map_columns(queries::list_columns(conn, name).await?, &opts);
    Ok(table)
}
