use std::time::Duration;

use sqlx::mysql::MySqlConnectOptions;
use sqlx::{Connection, MySqlConnection};

use filmview_core::{
    check_requirements, top_rented_films_requirements, top_rented_films_view, validate_schema,
    Error, Order, Result, ViewRow, DEFAULT_VIEW_LIMIT, DEFAULT_VIEW_NAME,
};
use filmview_introspect::{introspect_mysql, reflect_table, IntrospectOptions};

use crate::executor::{materialize_view, read_view};

/// What to create.
#[derive(Debug, Clone)]
pub struct RunSpec {
    pub view_name: String,
    pub limit: u64,
    pub connect_timeout: Option<Duration>,
}

impl Default for RunSpec {
    fn default() -> Self {
        Self {
            view_name: DEFAULT_VIEW_NAME.to_string(),
            limit: DEFAULT_VIEW_LIMIT,
            connect_timeout: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreatedView {
    pub name: String,
    pub ddl: String,
}

async fn connect(options: &MySqlConnectOptions, timeout: Option<Duration>) -> Result<MySqlConnection> {
    let attempt = MySqlConnection::connect_with(options);
    let result = match timeout {
        Some(limit) => tokio::time::timeout(limit, attempt)
            .await
            .map_err(|_| Error::Db(format!("connection timed out after {}s", limit.as_secs())))?,
        None => attempt.await,
    };
    result.map_err(|err| Error::Db(err.to_string()))
}

async fn close(conn: MySqlConnection) -> Result<()> {
    conn.close().await.map_err(|err| Error::Db(err.to_string()))
}

/// Reflect the source tables, check them, and create or replace the view.
///
/// Uses its own connection, closed before returning.
pub async fn create_view(options: &MySqlConnectOptions, spec: &RunSpec) -> Result<CreatedView> {
    let view = top_rented_films_view(&spec.view_name, spec.limit)?;
    let requirements = top_rented_films_requirements();
    let tables: Vec<&str> = requirements.iter().map(|req| req.table.as_str()).collect();

    let mut conn = connect(options, spec.connect_timeout).await?;

    let result = async {
        let schema = introspect_mysql(&mut conn, &IntrospectOptions::only(&tables)).await?;
        validate_schema(&schema)?;
        tracing::info!(event = "schema_reflected", tables = schema.tables.len());

        check_requirements(&schema, &requirements)?;
        tracing::info!(event = "requirements_checked");

        let ddl = materialize_view(&mut conn, &view).await?;
        tracing::info!(event = "view_created", view = %spec.view_name);
        tracing::debug!(event = "view_ddl", sql = %ddl);

        Ok::<_, Error>(CreatedView {
            name: spec.view_name.clone(),
            ddl,
        })
    }
    .await;

    let closed = close(conn).await;
    let value = result?;
    closed?;
    Ok(value)
}

/// Reflect the view and select all of its rows, most rented first.
///
/// Uses its own connection, closed before returning.
pub async fn read_back(options: &MySqlConnectOptions, spec: &RunSpec) -> Result<Vec<ViewRow>> {
    let mut conn = connect(options, spec.connect_timeout).await?;

    let result = async {
        let table = reflect_table(&mut conn, &spec.view_name).await?;
        let rows = read_view(&mut conn, &table, Some(("rental_count", Order::Desc))).await?;
        tracing::info!(event = "view_read", view = %table.name, rows = rows.len());
        Ok::<_, Error>(rows)
    }
    .await;

    let closed = close(conn).await;
    let value = result?;
    closed?;
    Ok(value)
}
