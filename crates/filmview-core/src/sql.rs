//! A small SQL builder for the statements filmview issues.
//!
//! The expression language only covers column references and `COUNT`; there
//! is no literal variant, so values never reach the rendered text. The one
//! number that does, the `LIMIT`, is typed as `u64`.

use std::fmt;

use crate::error::{Error, Result};

/// Name of the view created by default.
pub const DEFAULT_VIEW_NAME: &str = "top_rented_films";
/// Row limit of the default view.
pub const DEFAULT_VIEW_LIMIT: u64 = 10;

const MAX_IDENT_LEN: usize = 64;

/// MySQL 8 reserved words (plus `view`), sorted for binary search.
const RESERVED: &[&str] = &[
    "accessible", "add", "all", "alter", "analyze", "and", "as", "asc", "asensitive", "before",
    "between", "bigint", "binary", "blob", "both", "by", "call", "cascade", "case", "change",
    "char", "character", "check", "collate", "column", "condition", "constraint", "continue",
    "convert", "create", "cross", "cube", "cume_dist", "current_date", "current_time",
    "current_timestamp", "current_user", "cursor", "database", "databases", "day_hour",
    "day_microsecond", "day_minute", "day_second", "dec", "decimal", "declare", "default",
    "delayed", "delete", "dense_rank", "desc", "describe", "deterministic", "distinct",
    "distinctrow", "div", "double", "drop", "dual", "each", "else", "elseif", "empty", "enclosed",
    "escaped", "except", "exists", "exit", "explain", "false", "fetch", "first_value", "float",
    "float4", "float8", "for", "force", "foreign", "from", "fulltext", "function", "generated",
    "get", "grant", "group", "grouping", "groups", "having", "high_priority", "hour_microsecond",
    "hour_minute", "hour_second", "if", "ignore", "in", "index", "infile", "inner", "inout",
    "insensitive", "insert", "int", "int1", "int2", "int3", "int4", "int8", "integer", "intersect",
    "interval", "into", "io_after_gtids", "io_before_gtids", "is", "iterate", "join", "json_table",
    "key", "keys", "kill", "lag", "last_value", "lateral", "lead", "leading", "leave", "left",
    "like", "limit", "linear", "lines", "load", "localtime", "localtimestamp", "lock", "long",
    "longblob", "longtext", "loop", "low_priority", "manual", "master_bind",
    "master_ssl_verify_server_cert", "match", "maxvalue", "mediumblob", "mediumint", "mediumtext",
    "middleint", "minute_microsecond", "minute_second", "mod", "modifies", "natural",
    "no_write_to_binlog", "not", "nth_value", "ntile", "null", "numeric", "of", "on", "optimize",
    "optimizer_costs", "option", "optionally", "or", "order", "out", "outer", "outfile", "over",
    "parallel", "partition", "percent_rank", "precision", "primary", "procedure", "purge",
    "qualify", "range", "rank", "read", "read_write", "reads", "real", "recursive", "references",
    "regexp", "release", "rename", "repeat", "replace", "require", "resignal", "restrict",
    "return", "revoke", "right", "rlike", "row", "row_number", "rows", "schema", "schemas",
    "second_microsecond", "select", "sensitive", "separator", "set", "show", "signal", "smallint",
    "spatial", "specific", "sql", "sql_big_result", "sql_calc_found_rows", "sql_small_result",
    "sqlexception", "sqlstate", "sqlwarning", "ssl", "starting", "stored", "straight_join",
    "system", "table", "tablesample", "terminated", "then", "tinyblob", "tinyint", "tinytext",
    "to", "trailing", "trigger", "true", "undo", "union", "unique", "unlock", "unsigned", "update",
    "usage", "use", "using", "utc_date", "utc_time", "utc_timestamp", "values", "varbinary",
    "varchar", "varcharacter", "varying", "view", "virtual", "when", "where", "while", "window",
    "with", "write", "xor", "year_month", "zerofill",
];

/// A validated SQL identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident(String);

impl Ident {
    pub fn new(name: &str) -> Result<Self> {
        let invalid = |reason| Error::InvalidIdentifier {
            name: name.to_string(),
            reason,
        };

        if name.is_empty() {
            return Err(invalid("identifier is empty"));
        }
        if name.chars().count() > MAX_IDENT_LEN {
            return Err(invalid("identifier exceeds 64 characters"));
        }
        if name.contains('\0') {
            return Err(invalid("identifier contains NUL"));
        }
        if name.ends_with(' ') {
            return Err(invalid("identifier ends with a space"));
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_bare(&self) -> bool {
        let mut chars = self.0.chars();
        let starts_ok = chars
            .next()
            .is_some_and(|first| first.is_ascii_alphabetic() || first == '_');
        starts_ok
            && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
            && RESERVED
                .binary_search(&self.0.to_ascii_lowercase().as_str())
                .is_err()
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_bare() {
            f.write_str(&self.0)
        } else {
            write!(f, "`{}`", self.0.replace('`', "``"))
        }
    }
}

/// A column qualified by its table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    pub table: Ident,
    pub column: Ident,
}

impl ColumnRef {
    pub fn new(table: &str, column: &str) -> Result<Self> {
        Ok(Self {
            table: Ident::new(table)?,
            column: Ident::new(column)?,
        })
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Column(ColumnRef),
    Count(Box<Expr>),
}

impl Expr {
    pub fn column(table: &str, column: &str) -> Result<Self> {
        Ok(Expr::Column(ColumnRef::new(table, column)?))
    }

    pub fn count(inner: Expr) -> Self {
        Expr::Count(Box::new(inner))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Column(column) => write!(f, "{column}"),
            Expr::Count(inner) => write!(f, "COUNT({inner})"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::Asc => f.write_str("ASC"),
            Order::Desc => f.write_str("DESC"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SelectItem {
    expr: Expr,
    alias: Option<Ident>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Join {
    table: Ident,
    left: ColumnRef,
    right: ColumnRef,
}

/// A `SELECT` statement built up clause by clause.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Select {
    items: Vec<SelectItem>,
    from: Option<Ident>,
    joins: Vec<Join>,
    group_by: Vec<Expr>,
    order_by: Vec<(Expr, Order)>,
    limit: Option<u64>,
}

impl Select {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(mut self, expr: Expr) -> Self {
        self.items.push(SelectItem { expr, alias: None });
        self
    }

    pub fn select_as(mut self, expr: Expr, alias: Ident) -> Self {
        self.items.push(SelectItem {
            expr,
            alias: Some(alias),
        });
        self
    }

    pub fn from(mut self, table: Ident) -> Self {
        self.from = Some(table);
        self
    }

    /// Inner join `table` on `left = right`.
    pub fn inner_join(mut self, table: Ident, left: ColumnRef, right: ColumnRef) -> Self {
        self.joins.push(Join { table, left, right });
        self
    }

    pub fn group_by(mut self, expr: Expr) -> Self {
        self.group_by.push(expr);
        self
    }

    pub fn order_by(mut self, expr: Expr, order: Order) -> Self {
        self.order_by.push((expr, order));
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Output column names in select order; unaliased columns use their column name.
    pub fn output_columns(&self) -> Vec<&str> {
        self.items
            .iter()
            .map(|item| match (&item.alias, &item.expr) {
                (Some(alias), _) => alias.as_str(),
                (None, Expr::Column(column)) => column.column.as_str(),
                (None, Expr::Count(_)) => "COUNT",
            })
            .collect()
    }

    pub fn to_sql(&self) -> Result<String> {
        if self.items.is_empty() {
            return Err(Error::InvalidQuery("select list is empty".to_string()));
        }
        let from = self
            .from
            .as_ref()
            .ok_or_else(|| Error::InvalidQuery("missing FROM clause".to_string()))?;

        let items = self
            .items
            .iter()
            .map(|item| match &item.alias {
                Some(alias) => format!("{} AS {alias}", item.expr),
                None => item.expr.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ");

        let mut sql = format!("SELECT {items} FROM {from}");

        for join in &self.joins {
            sql.push_str(&format!(
                " JOIN {} ON {} = {}",
                join.table, join.left, join.right
            ));
        }

        if !self.group_by.is_empty() {
            let group = self
                .group_by
                .iter()
                .map(Expr::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            sql.push_str(&format!(" GROUP BY {group}"));
        }

        if !self.order_by.is_empty() {
            let order = self
                .order_by
                .iter()
                .map(|(expr, order)| format!("{expr} {order}"))
                .collect::<Vec<_>>()
                .join(", ");
            sql.push_str(&format!(" ORDER BY {order}"));
        }

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        Ok(sql)
    }
}

/// `CREATE [OR REPLACE] VIEW name AS <select>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateView {
    pub name: Ident,
    pub query: Select,
    pub or_replace: bool,
}

impl CreateView {
    pub fn or_replace(name: Ident, query: Select) -> Self {
        Self {
            name,
            query,
            or_replace: true,
        }
    }

    pub fn to_sql(&self) -> Result<String> {
        let verb = if self.or_replace {
            "CREATE OR REPLACE VIEW"
        } else {
            "CREATE VIEW"
        };
        Ok(format!("{verb} {} AS {}", self.name, self.query.to_sql()?))
    }
}

/// Per film, the number of rentals of any of its inventory items, most rented first.
pub fn top_rented_films_query(limit: u64) -> Result<Select> {
    let rental_count = Expr::count(Expr::column("rental", "inventory_id")?);

    Ok(Select::new()
        .select(Expr::column("film", "title")?)
        .select(Expr::column("film", "film_id")?)
        .select_as(rental_count.clone(), Ident::new("rental_count")?)
        .from(Ident::new("rental")?)
        .inner_join(
            Ident::new("inventory")?,
            ColumnRef::new("rental", "inventory_id")?,
            ColumnRef::new("inventory", "inventory_id")?,
        )
        .inner_join(
            Ident::new("film")?,
            ColumnRef::new("inventory", "film_id")?,
            ColumnRef::new("film", "film_id")?,
        )
        .group_by(Expr::column("film", "film_id")?)
        .order_by(rental_count, Order::Desc)
        .limit(limit))
}

pub fn top_rented_films_view(name: &str, limit: u64) -> Result<CreateView> {
    Ok(CreateView::or_replace(
        Ident::new(name)?,
        top_rented_films_query(limit)?,
    ))
}
