//! A tableauth [`DatabaseAdapter`] that runs lookups against SQLite.
//!
//! Here is an example of using this back-end:
//!
//! ```no_run
//! use tableauth_core::db::{BoundValues, DatabaseAdapter};
//! use tableauth_sqlite::SqliteDatabase;
//!
//! # async fn demo() -> Result<(), tableauth_core::BoxError> {
//! let db = SqliteDatabase::open_in_memory()?;
//! db.execute_batch("CREATE TABLE user (email TEXT, password TEXT); INSERT INTO user VALUES ('a@x.com', 'secret');")?;
//!
//! let mut values = BoundValues::new();
//! values.push(":v1", "a@x.com");
//! let rows = db.get("SELECT user.* FROM user WHERE (user.email = :v1)", &values).await?;
//! assert_eq!(rows.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! [`DatabaseAdapter`]: tableauth_core::db::DatabaseAdapter

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use rusqlite::{
    Connection, ToSql,
    types::{Value as SqlValue, ValueRef},
};
use serde_json::Value;
use std::{
    path::Path,
    sync::{Arc, Mutex, PoisonError},
};
use tableauth_core::{
    BoxError,
    db::{BoundValues, DatabaseAdapter, Row},
};
use tokio::task::spawn_blocking;

/// A [`DatabaseAdapter`] backed by a single SQLite connection.
///
/// Clones share the connection. Queries run on tokio's blocking thread pool, one at a time.
///
/// Values map as follows: JSON null, booleans, integers, floats and strings become SQLite NULL,
/// INTEGER, INTEGER, REAL and TEXT. Unsigned integers beyond `i64::MAX` are bound as their decimal
/// TEXT. Reading back, BLOBs come out as base64 text.
#[derive(Clone, Debug)]
pub struct SqliteDatabase {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteDatabase {
    /// Opens (or creates) the database file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> rusqlite::Result<Self> {
        Ok(SqliteDatabase::from_connection(Connection::open(path)?))
    }

    /// Opens a fresh in-memory database.
    pub fn open_in_memory() -> rusqlite::Result<Self> {
        Ok(SqliteDatabase::from_connection(Connection::open_in_memory()?))
    }

    /// Wraps an already opened connection.
    pub fn from_connection(conn: Connection) -> Self {
        SqliteDatabase {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Runs semicolon separated statements, typically schema or fixture setup. Blocks the
    /// calling thread.
    pub fn execute_batch(&self, sql: &str) -> rusqlite::Result<()> {
        let conn = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        conn.execute_batch(sql)
    }
}

/// Runs a blocking closure on the blocking thread pool.
async fn asyncify<F, T>(f: F) -> Result<T, BoxError>
where
    F: FnOnce() -> Result<T, BoxError> + Send + 'static,
    T: Send + 'static,
{
    match spawn_blocking(f).await {
        Ok(res) => res,
        Err(_) => Err("background task failed".into()),
    }
}

fn to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Number(n) if n.is_u64() && n.as_i64().is_none() => SqlValue::Text(n.to_string()),
        Value::Number(n) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => n.as_f64().map_or(SqlValue::Null, SqlValue::Real),
        },
        Value::String(s) => SqlValue::Text(s.clone()),
        other => SqlValue::Text(other.to_string()),
    }
}

fn from_sql(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => Value::from(f),
        ValueRef::Text(t) => Value::String(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Value::String(STANDARD.encode(b)),
    }
}

fn query(conn: &Connection, sql: &str, values: &[(String, SqlValue)]) -> Result<Vec<Row>, BoxError> {
    let mut stmt = conn.prepare(sql)?;
    let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let params: Vec<(&str, &dyn ToSql)> = values.iter().map(|(p, v)| (p.as_str(), v as &dyn ToSql)).collect();

    let mut rows = stmt.query(params.as_slice())?;
    let mut result = Vec::new();
    while let Some(row) = rows.next()? {
        let mut out = Row::new();
        for (i, name) in names.iter().enumerate() {
            out.insert(name.as_str(), from_sql(row.get_ref(i)?));
        }
        result.push(out);
    }
    Ok(result)
}

#[async_trait]
impl DatabaseAdapter for SqliteDatabase {
    #[tracing_attributes::instrument(skip(self, values))]
    async fn get(&self, sql: &str, values: &BoundValues) -> Result<Vec<Row>, BoxError> {
        let conn = self.conn.clone();
        let sql = sql.to_string();
        let values: Vec<(String, SqlValue)> = values.iter().map(|(p, v)| (p.to_string(), to_sql(v))).collect();

        let rows = asyncify(move || {
            let conn = conn.lock().map_err(|_| "sqlite connection mutex poisoned")?;
            query(&conn, &sql, &values)
        })
        .await?;
        tracing::trace!(rows = rows.len(), "query done");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests;
