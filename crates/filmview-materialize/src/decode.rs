use sqlx::mysql::MySqlRow;
use sqlx::{Column, Row, TypeInfo, ValueRef};

use filmview_core::{Error, Result, Value, ViewRow};

/// Decode a row whose column types are only known at runtime.
pub fn decode_row(row: &MySqlRow, columns: &[String]) -> Result<ViewRow> {
    let values = (0..row.len())
        .map(|idx| decode_value(row, idx))
        .collect::<Result<Vec<_>>>()?;

    let columns = if columns.len() == values.len() {
        columns.to_vec()
    } else {
        row.columns()
            .iter()
            .map(|column| column.name().to_string())
            .collect()
    };

    Ok(ViewRow { columns, values })
}

fn decode_value(row: &MySqlRow, idx: usize) -> Result<Value> {
    let raw = row
        .try_get_raw(idx)
        .map_err(|err| Error::Decode(err.to_string()))?;
    if raw.is_null() {
        return Ok(Value::Null);
    }

    // try_get checks type compatibility before decoding, so a miss is cheap.
    if let Ok(value) = row.try_get::<i64, _>(idx) {
        return Ok(Value::Int(value));
    }
    if let Ok(value) = row.try_get::<u64, _>(idx) {
        return Ok(Value::UInt(value));
    }
    if let Ok(value) = row.try_get::<f64, _>(idx) {
        return Ok(Value::Float(value));
    }
    if let Ok(value) = row.try_get::<String, _>(idx) {
        return Ok(Value::Text(value));
    }
    if let Ok(value) = row.try_get::<Vec<u8>, _>(idx) {
        return Ok(Value::Bytes(value));
    }

    let column = &row.columns()[idx];
    Err(Error::Decode(format!(
        "column {} has unsupported type {}",
        column.name(),
        column.type_info().name()
    )))
}
