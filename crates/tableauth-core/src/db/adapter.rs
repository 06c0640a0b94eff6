use super::{BoundValues, Row};
use crate::BoxError;
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

/// Runs SQL text with bound values and returns the resulting rows.
#[async_trait]
pub trait DatabaseAdapter: Send + Sync + Debug {
    /// Executes `sql`, binding `values` to its named placeholders, and returns every row in the
    /// order the database produced them.
    ///
    /// Any failure (malformed SQL, a missing table, a lost connection) is returned as an error.
    async fn get(&self, sql: &str, values: &BoundValues) -> Result<Vec<Row>, BoxError>;
}

#[async_trait]
impl<T> DatabaseAdapter for Arc<T>
where
    T: DatabaseAdapter + ?Sized,
{
    async fn get(&self, sql: &str, values: &BoundValues) -> Result<Vec<Row>, BoxError> {
        (**self).get(sql, values).await
    }
}
