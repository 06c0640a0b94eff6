//! Core traits and types for tableauth credential adapters.
//!
//! The adapter itself lives in the `tableauth` crate. This crate holds the narrow contracts it
//! talks to: a [`DatabaseAdapter`](db::DatabaseAdapter) that runs SQL, a
//! [`QueryBuilder`](query::QueryBuilder) that writes it, and the [`Adapter`](auth::Adapter)
//! capability that authentication adapters expose to their callers.

pub mod auth;
pub mod db;
pub mod query;

/// A boxed error as returned by collaborators (database handles, credential callbacks).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
