//! Logs a user in against an in-memory user table and prints the profile row.

use std::num::NonZeroU32;
use tableauth::auth::{Adapter, CallbackCheckAdapter};
use tableauth::credential;
use tableauth::query::GenericBuilder;
use tableauth_sqlite::SqliteDatabase;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let hash = credential::hash_pbkdf2("A,0p3QC!0_", b"kira", NonZeroU32::new(100_000).ok_or("zero iterations")?);
    let db = SqliteDatabase::open_in_memory()?;
    db.execute_batch(&format!(
        "CREATE TABLE user (id INTEGER PRIMARY KEY, email TEXT, password TEXT, is_active INTEGER, is_admin INTEGER);
         INSERT INTO user VALUES (1, 'kira-shanahan@yahoo.com', '{}', 1, 0);",
        hash
    ))?;

    let mut adapter = CallbackCheckAdapter::new(db, GenericBuilder::new())
        .with_table_name("user")
        .with_identity_column("email")
        .with_credential_column("password")
        .with_credential_validation_callback(credential::verify_pbkdf2);

    let result = adapter
        .set_identity("kira-shanahan@yahoo.com")
        .set_credential("A,0p3QC!0_")
        .authenticate()
        .await?;

    if result.is_valid() {
        println!("Authentication succeeded");
        // all columns: adapter.result_row_object(None, None)
        // only some:   adapter.result_row_only(&["email", "is_active"])
        println!("{:?}", adapter.result_row_omit(&["password"]));
    } else {
        println!("Authentication failed: {} {:?}", result.code(), result.messages());
    }
    Ok(())
}
