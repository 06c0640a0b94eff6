use super::Select;
use crate::db::BoundValues;
use std::{fmt::Debug, sync::Arc};
use thiserror::Error;

/// SQL text together with the values bound to its placeholders.
#[derive(Clone, PartialEq, Debug)]
pub struct Statement {
    /// The SQL text, with named placeholders such as `:v1`.
    pub sql: String,
    /// The values for the placeholders in `sql`.
    pub values: BoundValues,
}

/// The error returned when a [`Select`] cannot be written as SQL.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// The select has no table.
    #[error("no table to select from")]
    MissingTable,
    /// A table or column name is not a plain identifier.
    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),
}

/// Creates query descriptions and writes them as SQL.
pub trait QueryBuilder: Send + Sync + Debug {
    /// Creates a select of all columns of `table`.
    fn select(&self, table: &str) -> Select {
        Select::new(table)
    }

    /// Writes `query` as SQL text plus bound values.
    fn write(&self, query: &Select) -> Result<Statement, BuildError>;
}

impl<T> QueryBuilder for Arc<T>
where
    T: QueryBuilder + ?Sized,
{
    fn select(&self, table: &str) -> Select {
        (**self).select(table)
    }

    fn write(&self, query: &Select) -> Result<Statement, BuildError> {
        (**self).write(query)
    }
}
