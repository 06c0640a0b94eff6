//! An [`Adapter`] that checks credentials against table rows with a callback

use super::{Adapter, AuthenticationResult, Error, ErrorKind, ResultCode};
use crate::{
    BoxError,
    credential::{self, CredentialCallback},
    options::AdapterConfig,
};
use async_trait::async_trait;
use serde_json::Value;
use std::{fmt, sync::Arc};
use tableauth_core::{
    db::{DatabaseAdapter, Row},
    query::{QueryBuilder, Select},
};
use tracing::{debug, warn};

const MSG_IDENTITY_NOT_FOUND: &str = "A record with the supplied identity could not be found.";
const MSG_IDENTITY_AMBIGUOUS: &str = "More than one record matches the supplied identity.";
const MSG_CREDENTIAL_INVALID: &str = "Supplied credential is invalid.";
const MSG_SUCCESS: &str = "Authentication successful.";

/// [`Adapter`] implementation that looks up the rows matching an identity in a database table
/// and checks the credential of each row with a callback.
///
/// The adapter keeps state between calls: the pending select returned by
/// [`db_select`](CallbackCheckAdapter::db_select), the identity and credential of the next
/// attempt and the row captured by the last successful attempt. It is reusable for any number of
/// attempts but must not be shared by concurrent ones.
///
/// # Example
///
/// ```no_run
/// use tableauth::auth::{Adapter, CallbackCheckAdapter, ResultCode};
/// use tableauth::query::GenericBuilder;
/// use tableauth_sqlite::SqliteDatabase;
///
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let mut adapter = CallbackCheckAdapter::new(SqliteDatabase::open("users.db")?, GenericBuilder::new())
///     .with_table_name("user")
///     .with_identity_column("email")
///     .with_credential_column("password");
///
/// // Only administrators may log in here.
/// adapter.db_select().where_().equals("is_admin", 1).end();
///
/// let result = adapter.set_identity("kira@example.com").set_credential("secret").authenticate().await?;
/// assert_eq!(result.code(), ResultCode::IdentityNotFound);
/// # Ok(())
/// # }
/// ```
pub struct CallbackCheckAdapter {
    db: Arc<dyn DatabaseAdapter>,
    query_builder: Arc<dyn QueryBuilder>,
    select: Option<Select>,
    table_name: Option<String>,
    identity_column: Option<String>,
    credential_column: Option<String>,
    credential_validation_callback: CredentialCallback,
    ambiguity_identity: bool,
    identity: Option<String>,
    credential: Option<String>,
    result_row: Option<Row>,
}

/// The validated configuration of one attempt.
struct Attempt {
    table_name: String,
    identity_column: String,
    credential_column: String,
    identity: String,
    credential: String,
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}

impl CallbackCheckAdapter {
    /// Creates an adapter that queries `db` with SQL written by `query_builder`.
    ///
    /// Until another callback is set, credentials are checked with
    /// [`credential::verify_plain`].
    pub fn new<D, B>(db: D, query_builder: B) -> Self
    where
        D: DatabaseAdapter + 'static,
        B: QueryBuilder + 'static,
    {
        CallbackCheckAdapter {
            db: Arc::new(db),
            query_builder: Arc::new(query_builder),
            select: None,
            table_name: None,
            identity_column: None,
            credential_column: None,
            credential_validation_callback: Arc::new(credential::verify_plain),
            ambiguity_identity: false,
            identity: None,
            credential: None,
            result_row: None,
        }
    }

    /// Creates an adapter configured from `config`.
    ///
    /// # Errors
    ///
    /// Fails with [`ErrorKind::InvalidCallback`] when the configured credential check is not
    /// known.
    pub fn from_config<D, B>(db: D, query_builder: B, config: AdapterConfig) -> Result<Self, Error>
    where
        D: DatabaseAdapter + 'static,
        B: QueryBuilder + 'static,
    {
        let mut adapter = CallbackCheckAdapter::new(db, query_builder);
        adapter.table_name = config.table_name;
        adapter.identity_column = config.identity_column;
        adapter.credential_column = config.credential_column;
        adapter.ambiguity_identity = config.ambiguity_identity;
        if let Some(name) = config.credential_check {
            adapter.set_credential_validation_callback_by_name(&name)?;
        }
        Ok(adapter)
    }

    /// Sets the table to look identities up in.
    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.set_table_name(table_name);
        self
    }

    /// Sets the column holding the identity.
    pub fn with_identity_column(mut self, identity_column: impl Into<String>) -> Self {
        self.set_identity_column(identity_column);
        self
    }

    /// Sets the column holding the credential.
    pub fn with_credential_column(mut self, credential_column: impl Into<String>) -> Self {
        self.set_credential_column(credential_column);
        self
    }

    /// Sets the callback that compares the stored credential (first argument) with the supplied
    /// one (second argument).
    pub fn with_credential_validation_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Value, &str) -> Result<bool, BoxError> + Send + Sync + 'static,
    {
        self.set_credential_validation_callback(callback);
        self
    }

    /// Allows or disallows several rows sharing the same identity.
    pub fn with_ambiguity_identity(mut self, flag: bool) -> Self {
        self.set_ambiguity_identity(flag);
        self
    }

    /// Sets the table to look identities up in.
    pub fn set_table_name(&mut self, table_name: impl Into<String>) -> &mut Self {
        self.table_name = Some(table_name.into());
        self
    }

    /// Sets the column holding the identity.
    pub fn set_identity_column(&mut self, identity_column: impl Into<String>) -> &mut Self {
        self.identity_column = Some(identity_column.into());
        self
    }

    /// Sets the column holding the credential.
    pub fn set_credential_column(&mut self, credential_column: impl Into<String>) -> &mut Self {
        self.credential_column = Some(credential_column.into());
        self
    }

    /// Sets the callback that compares the stored credential (first argument) with the supplied
    /// one (second argument). Only `Ok(true)` counts as a match; an error ends the attempt with
    /// [`ResultCode::Uncategorized`].
    pub fn set_credential_validation_callback<F>(&mut self, callback: F) -> &mut Self
    where
        F: Fn(&Value, &str) -> Result<bool, BoxError> + Send + Sync + 'static,
    {
        self.credential_validation_callback = Arc::new(callback);
        self
    }

    /// Selects one of the bundled callbacks by name, see [`credential::by_name`].
    ///
    /// # Errors
    ///
    /// Fails with [`ErrorKind::InvalidCallback`] for unknown names, leaving the current callback
    /// in place.
    pub fn set_credential_validation_callback_by_name(&mut self, name: &str) -> Result<&mut Self, Error> {
        self.credential_validation_callback = credential::by_name(name)?;
        Ok(self)
    }

    /// Allows or disallows several rows sharing the same identity. When allowed, the rows are
    /// tried in query order until one of them accepts the credential.
    pub fn set_ambiguity_identity(&mut self, flag: bool) -> &mut Self {
        self.ambiguity_identity = flag;
        self
    }

    /// Whether several rows may share the same identity.
    pub fn ambiguity_identity(&self) -> bool {
        self.ambiguity_identity
    }

    /// Replaces the query builder.
    pub fn set_query_builder<B>(&mut self, query_builder: B) -> &mut Self
    where
        B: QueryBuilder + 'static,
    {
        self.query_builder = Arc::new(query_builder);
        self
    }

    /// The select used for lookups, for callers to add conditions or restrict columns.
    ///
    /// It is created on first use and selects all columns of the configured table. Changes to it
    /// persist across attempts; each attempt works on a copy to which the identity condition is
    /// added.
    pub fn db_select(&mut self) -> &mut Select {
        let query_builder = &self.query_builder;
        let table_name = self.table_name.as_deref().unwrap_or_default();
        self.select.get_or_insert_with(|| query_builder.select(table_name))
    }

    /// The row captured by the last successful attempt.
    pub fn result_row(&self) -> Option<&Row> {
        self.result_row.as_ref().filter(|row| !row.is_empty())
    }

    /// A projection of the captured row.
    ///
    /// With `return_columns`, only those columns are kept (names the row does not have are
    /// ignored). Otherwise `omit_columns` are removed. With neither the full row is returned.
    /// Returns `None` when no row is captured.
    pub fn result_row_object(&self, return_columns: Option<&[&str]>, omit_columns: Option<&[&str]>) -> Option<Row> {
        let row = self.result_row()?;

        if let Some(columns) = return_columns {
            return Some(
                columns
                    .iter()
                    .filter_map(|column| row.get(column).map(|value| (*column, value.clone())))
                    .collect(),
            );
        }
        if let Some(omit) = omit_columns {
            return Some(
                row.iter()
                    .filter(|(column, _)| !omit.contains(column))
                    .map(|(column, value)| (column, value.clone()))
                    .collect(),
            );
        }
        Some(row.clone())
    }

    /// The captured row restricted to `columns`, see [`result_row_object`](Self::result_row_object).
    pub fn result_row_only(&self, columns: &[&str]) -> Option<Row> {
        self.result_row_object(Some(columns), None)
    }

    /// The captured row without `columns`, see [`result_row_object`](Self::result_row_object).
    pub fn result_row_omit(&self, columns: &[&str]) -> Option<Row> {
        self.result_row_object(None, Some(columns))
    }

    fn authenticate_setup(&self) -> Result<Attempt, Error> {
        let kind = if is_blank(&self.table_name) {
            ErrorKind::MissingTableName
        } else if is_blank(&self.identity_column) {
            ErrorKind::MissingIdentityColumn
        } else if is_blank(&self.credential_column) {
            ErrorKind::MissingCredentialColumn
        } else if is_blank(&self.identity) {
            ErrorKind::MissingIdentity
        } else if self.credential.is_none() {
            ErrorKind::MissingCredential
        } else {
            return Ok(Attempt {
                table_name: self.table_name.clone().unwrap_or_default(),
                identity_column: self.identity_column.clone().unwrap_or_default(),
                credential_column: self.credential_column.clone().unwrap_or_default(),
                identity: self.identity.clone().unwrap_or_default(),
                credential: self.credential.clone().unwrap_or_default(),
            });
        };
        Err(kind.into())
    }

    fn authenticate_create_select(&mut self, attempt: &Attempt) -> Select {
        let mut select = self.db_select().clone();
        select
            .set_table(attempt.table_name.as_str())
            .where_()
            .equals(attempt.identity_column.as_str(), attempt.identity.as_str())
            .end();
        select
    }

    async fn authenticate_query_select(&self, select: &Select) -> Result<Vec<Row>, Error> {
        let statement = self.query_builder.write(select).map_err(|e| Error::new(ErrorKind::InvalidQuery, e))?;
        debug!(sql = %statement.sql, "looking up identity");
        self.db
            .get(&statement.sql, &statement.values)
            .await
            .map_err(|e| Error::new(ErrorKind::InvalidQuery, e))
    }
}

#[async_trait]
impl Adapter for CallbackCheckAdapter {
    fn set_identity(&mut self, identity: impl Into<String>) -> &mut Self {
        self.identity = Some(identity.into());
        self
    }

    fn set_credential(&mut self, credential: impl Into<String>) -> &mut Self {
        self.credential = Some(credential.into());
        self
    }

    #[tracing_attributes::instrument(skip(self))]
    async fn authenticate(&mut self) -> Result<AuthenticationResult, Error> {
        self.result_row = None;
        let attempt = self.authenticate_setup()?;

        let select = self.authenticate_create_select(&attempt);
        let rows = self.authenticate_query_select(&select).await?;
        debug!(identity = %attempt.identity, rows = rows.len(), "identity lookup done");

        let mut messages = Vec::new();
        if rows.is_empty() {
            messages.push(MSG_IDENTITY_NOT_FOUND.to_string());
            return Ok(AuthenticationResult::new(ResultCode::IdentityNotFound, attempt.identity, messages));
        }
        if rows.len() > 1 && !self.ambiguity_identity {
            messages.push(MSG_IDENTITY_AMBIGUOUS.to_string());
            return Ok(AuthenticationResult::new(ResultCode::IdentityAmbiguous, attempt.identity, messages));
        }

        let null = Value::Null;
        for row in rows {
            let stored = row.get(&attempt.credential_column).unwrap_or(&null);
            match (self.credential_validation_callback)(stored, attempt.credential.as_str()) {
                Ok(true) => {
                    messages.push(MSG_SUCCESS.to_string());
                    self.result_row = Some(row);
                    return Ok(AuthenticationResult::new(ResultCode::Success, attempt.identity, messages));
                }
                Ok(false) => messages.push(MSG_CREDENTIAL_INVALID.to_string()),
                Err(e) => {
                    warn!(identity = %attempt.identity, error = %e, "credential validation callback failed");
                    messages.push(e.to_string());
                    return Ok(AuthenticationResult::new(ResultCode::Uncategorized, attempt.identity, messages));
                }
            }
        }

        Ok(AuthenticationResult::new(ResultCode::CredentialInvalid, attempt.identity, messages))
    }
}

impl fmt::Debug for CallbackCheckAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackCheckAdapter")
            .field("db", &self.db)
            .field("query_builder", &self.query_builder)
            .field("select", &self.select)
            .field("table_name", &self.table_name)
            .field("identity_column", &self.identity_column)
            .field("credential_column", &self.credential_column)
            .field("ambiguity_identity", &self.ambiguity_identity)
            .field("identity", &self.identity)
            .field("credential", &self.credential.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}
