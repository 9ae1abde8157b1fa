use sqlx::MySqlConnection;

use filmview_core::{CreateView, Error, Expr, Ident, Order, Result, Select, Table, ViewRow};

use crate::decode::decode_row;

/// Execute `CREATE [OR REPLACE] VIEW` and return the statement that ran.
pub async fn materialize_view(conn: &mut MySqlConnection, view: &CreateView) -> Result<String> {
    let ddl = view.to_sql()?;

    // DDL has no parameters; send it unprepared.
    sqlx::raw_sql(&ddl)
        .execute(&mut *conn)
        .await
        .map_err(|err| Error::Db(err.to_string()))?;

    Ok(ddl)
}

/// Select every column of a reflected table or view, in ordinal order.
///
/// `order` sorts the result by one of the table's columns; it is ignored when
/// the column does not exist.
pub async fn read_view(
    conn: &mut MySqlConnection,
    table: &Table,
    order: Option<(&str, Order)>,
) -> Result<Vec<ViewRow>> {
    let query = read_query(table, order)?;
    let sql = query.to_sql()?;
    let columns: Vec<String> = table.columns.iter().map(|col| col.name.clone()).collect();

    let rows = sqlx::query(&sql)
        .fetch_all(&mut *conn)
        .await
        .map_err(|err| Error::Db(err.to_string()))?;

    rows.iter().map(|row| decode_row(row, &columns)).collect()
}

fn read_query(table: &Table, order: Option<(&str, Order)>) -> Result<Select> {
    let mut query = Select::new().from(Ident::new(&table.name)?);
    for column in &table.columns {
        query = query.select(Expr::column(&table.name, &column.name)?);
    }

    if let Some((name, direction)) = order {
        if let Some(column) = table.column(name) {
            query = query.order_by(Expr::column(&table.name, &column.name)?, direction);
        }
    }

    Ok(query)
}
