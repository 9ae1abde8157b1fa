use async_trait::async_trait;

use filmview_core::{DatabaseSchema, Result};

use crate::options::IntrospectOptions;

/// Trait implemented by database adapters that can introspect schemas.
#[async_trait]
pub trait Adapter {
    /// Returns the engine identifier (e.g. `mysql`).
    fn engine(&self) -> &'static str;

    /// Introspect the database and return a schema snapshot.
    async fn introspect(&mut self, opts: &IntrospectOptions) -> Result<DatabaseSchema>;
}
