//! tableauth authenticates identity/credential pairs against the rows of a database table.
//!
//! The [`CallbackCheckAdapter`](auth::CallbackCheckAdapter) looks up the rows whose identity
//! column equals the supplied identity and hands each row's credential column, together with the
//! supplied credential, to a comparison callback. It talks to the database through a
//! [`DatabaseAdapter`](db::DatabaseAdapter) and writes its SQL with a
//! [`QueryBuilder`](query::QueryBuilder) such as the bundled
//! [`GenericBuilder`](query::GenericBuilder).
//!
//! ```no_run
//! use tableauth::auth::{Adapter, CallbackCheckAdapter};
//! use tableauth::credential;
//! use tableauth::query::GenericBuilder;
//! use tableauth_sqlite::SqliteDatabase;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let db = SqliteDatabase::open("users.db")?;
//! let mut adapter = CallbackCheckAdapter::new(db, GenericBuilder::new())
//!     .with_table_name("user")
//!     .with_identity_column("email")
//!     .with_credential_column("password")
//!     .with_credential_validation_callback(credential::verify_pbkdf2);
//!
//! let result = adapter
//!     .set_identity("kira-shanahan@yahoo.com")
//!     .set_credential("A,0p3QC!0_")
//!     .authenticate()
//!     .await?;
//!
//! if result.is_valid() {
//!     let profile = adapter.result_row_omit(&["password"]);
//!     println!("welcome {:?}", profile);
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod credential;
pub mod options;
pub mod query;

pub use tableauth_core::{BoxError, db};
