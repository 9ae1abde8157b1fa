/// Options that control how introspection behaves.
#[derive(Debug, Clone)]
pub struct IntrospectOptions {
    pub include_views: bool,
    pub include_comments: bool,
    /// Restrict the snapshot to these tables; `None` reflects every table.
    pub tables: Option<Vec<String>>,
}

impl Default for IntrospectOptions {
    fn default() -> Self {
        Self {
            include_views: true,
            include_comments: true,
            tables: None,
        }
    }
}

impl IntrospectOptions {
    /// Options reflecting only the named tables.
    pub fn only(tables: &[&str]) -> Self {
        Self {
            tables: Some(tables.iter().map(|table| table.to_string()).collect()),
            ..Self::default()
        }
    }
}
