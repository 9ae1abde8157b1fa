use filmview_core::{Column, Table, TableKind};

use crate::options::IntrospectOptions;

use super::queries::{RawColumn, RawTable};

pub fn table_kind(table_type: &str) -> TableKind {
    match table_type {
        "BASE TABLE" => TableKind::Table,
        "VIEW" => TableKind::View,
        other => TableKind::Other(other.to_string()),
    }
}

pub fn map_tables(raw: Vec<RawTable>, opts: &IntrospectOptions) -> Vec<Table> {
    raw.into_iter()
        .filter(|table| match &opts.tables {
            Some(list) => list.iter().any(|item| item == &table.name),
            None => true,
        })
        .filter_map(|table| {
            let mapped = map_table(table, opts);
            (opts.include_views || mapped.kind != TableKind::View).then_some(mapped)
        })
        .collect()
}

pub fn map_table(raw: RawTable, opts: &IntrospectOptions) -> Table {
    let kind = table_kind(&raw.table_type);

    // Views report the literal comment "VIEW".
    let comment = raw
        .comment
        .filter(|comment| opts.include_comments && !comment.is_empty())
        .filter(|comment| kind != TableKind::View || comment != "VIEW");

    Table {
        name: raw.name,
        kind,
        comment,
        columns: Vec::new(),
    }
}

pub fn map_columns(raw: Vec<RawColumn>, opts: &IntrospectOptions) -> Vec<Column> {
    let mut columns: Vec<Column> = raw
        .into_iter()
        .map(|col| Column {
            ordinal_position: u32::try_from(col.ordinal_position).unwrap_or(u32::MAX),
            name: col.name,
            data_type: col.data_type,
            column_type: col.column_type,
            is_nullable: col.is_nullable.eq_ignore_ascii_case("YES"),
            default: col.column_default,
            comment: col
                .comment
                .filter(|comment| opts.include_comments && !comment.is_empty()),
        })
        .collect();

    columns.sort_by_key(|column| column.ordinal_position);
    columns
}
