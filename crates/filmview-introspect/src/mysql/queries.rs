//! Catalog queries against `information_schema`.
//!
//! Every text column is cast to `CHAR`: MySQL 8 reports several catalog
//! columns as binary strings, which do not decode into `String`.

use sqlx::{FromRow, MySqlConnection};

use filmview_core::{Error, Result};

fn db_error(err: sqlx::Error) -> Error {
    Error::Db(err.to_string())
}

pub async fn fetch_database_name(conn: &mut MySqlConnection) -> Result<Option<String>> {
    sqlx::query_scalar::<_, Option<String>>("select cast(database() as char)")
        .fetch_one(&mut *conn)
        .await
        .map_err(db_error)
}

#[derive(Debug, FromRow)]
pub struct RawTable {
    pub name: String,
    pub table_type: String,
    pub comment: Option<String>,
}

const TABLE_COLUMNS: &str = r#"
    select
      cast(table_name as char) as name,
      cast(table_type as char) as table_type,
      cast(table_comment as char) as comment
    from information_schema.tables
    where table_schema = database()
"#;

pub async fn list_tables(conn: &mut MySqlConnection) -> Result<Vec<RawTable>> {
    let sql = format!("{TABLE_COLUMNS} order by table_name");
    sqlx::query_as::<_, RawTable>(&sql)
        .fetch_all(&mut *conn)
        .await
        .map_err(db_error)
}

pub async fn find_table(conn: &mut MySqlConnection, table: &str) -> Result<Option<RawTable>> {
    let sql = format!("{TABLE_COLUMNS} and table_name = ?");
    sqlx::query_as::<_, RawTable>(&sql)
        .bind(table)
        .fetch_optional(&mut *conn)
        .await
        .map_err(db_error)
}

#[derive(Debug, FromRow)]
pub struct RawColumn {
    pub ordinal_position: u64,
    pub name: String,
    pub data_type: String,
    pub column_type: String,
    pub is_nullable: String,
    pub column_default: Option<String>,
    pub comment: Option<String>,
}

pub async fn list_columns(conn: &mut MySqlConnection, table: &str) -> Result<Vec<RawColumn>> {
    sqlx::query_as::<_, RawColumn>(
        r#"
        select
          cast(ordinal_position as unsigned) as ordinal_position,
          cast(column_name as char) as name,
          cast(data_type as char) as data_type,
          cast(column_type as char) as column_type,
          cast(is_nullable as char) as is_nullable,
          cast(column_default as char) as column_default,
          cast(column_comment as char) as comment
        from information_schema.columns
        where table_schema = database()
          and table_name = ?
        order by ordinal_position
        "#,
    )
    .bind(table)
    .fetch_all(&mut *conn)
    .await
    .map_err(db_error)
}
