use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{Error, Result};

/// A single value read back from a view, decoded without knowing the column type up front.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
}

impl Value {
    /// Integer view of the value, if it is a non-negative integer.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Int(value) => u64::try_from(*value).ok(),
            Value::UInt(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Int(value) => write!(f, "{value}"),
            Value::UInt(value) => write!(f, "{value}"),
            Value::Float(value) => write!(f, "{value}"),
            Value::Text(value) => {
                write!(f, "'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
            }
            Value::Bytes(bytes) => {
                f.write_str("0x")?;
                for byte in bytes {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
        }
    }
}

/// One row of a view, with the column names in the view's order.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewRow {
    pub columns: Vec<String>,
    pub values: Vec<Value>,
}

impl ViewRow {
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|name| name.eq_ignore_ascii_case(column))
            .and_then(|idx| self.values.get(idx))
    }
}

/// Renders as a tuple: `('ACADEMY DINOSAUR', 1, 34)`.
impl fmt::Display for ViewRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (idx, value) in self.values.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str(")")
    }
}

/// Serializes as an object keyed by column name, in column order.
impl Serialize for ViewRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, value) in self.columns.iter().zip(&self.values) {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// Typed row of the `top_rented_films` view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopRentedFilm {
    pub title: String,
    pub film_id: u64,
    pub rental_count: u64,
}

impl TryFrom<&ViewRow> for TopRentedFilm {
    type Error = Error;

    fn try_from(row: &ViewRow) -> Result<Self> {
        let missing = |column: &str| Error::Decode(format!("column {column} missing or mistyped"));

        Ok(Self {
            title: row
                .get("title")
                .and_then(Value::as_str)
                .ok_or_else(|| missing("title"))?
                .to_string(),
            film_id: row
                .get("film_id")
                .and_then(Value::as_u64)
                .ok_or_else(|| missing("film_id"))?,
            rental_count: row
                .get("rental_count")
                .and_then(Value::as_u64)
                .ok_or_else(|| missing("rental_count"))?,
        })
    }
}
