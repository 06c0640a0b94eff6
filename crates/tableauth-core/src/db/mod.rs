//! Contains the [`DatabaseAdapter`] trait and the [`Row`] and [`BoundValues`] types it deals in.
//!
//! A database adapter is the "run this query, give me rows" half of what an authentication
//! adapter needs. Implementations exist for SQLite (`tableauth-sqlite`) and you can define your
//! own to reach any other database:
//!
//! ```no_run
//! use async_trait::async_trait;
//! use tableauth_core::{BoxError, db::{BoundValues, DatabaseAdapter, Row}};
//!
//! #[derive(Debug)]
//! struct NoRows;
//!
//! #[async_trait]
//! impl DatabaseAdapter for NoRows {
//!     async fn get(&self, _sql: &str, _values: &BoundValues) -> Result<Vec<Row>, BoxError> {
//!         Ok(vec![])
//!     }
//! }
//! ```

mod adapter;
pub use adapter::DatabaseAdapter;

mod row;
pub use row::{BoundValues, Row};

pub use serde_json::Value;
