//! Restricts logins to administrators by adding a condition to the lookup select.

use tableauth::auth::{Adapter, CallbackCheckAdapter};
use tableauth::query::GenericBuilder;
use tableauth_sqlite::SqliteDatabase;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let db = SqliteDatabase::open_in_memory()?;
    db.execute_batch(
        "CREATE TABLE user (id INTEGER PRIMARY KEY, email TEXT, password TEXT, is_active INTEGER, is_admin INTEGER);
         INSERT INTO user VALUES (1, 'kira-shanahan@yahoo.com', 'A,0p3QC!0_', 1, 0);",
    )?;

    let mut adapter = CallbackCheckAdapter::new(db, GenericBuilder::new())
        .with_table_name("user")
        .with_identity_column("email")
        .with_credential_column("password");

    // SELECT user.* FROM user WHERE (user.is_admin = :v1) AND (user.email = :v2)
    adapter.db_select().where_().equals("is_admin", 1).end();

    let result = adapter
        .set_identity("kira-shanahan@yahoo.com")
        .set_credential("A,0p3QC!0_")
        .authenticate()
        .await?;

    // Kira is no administrator, so no record matches.
    println!("{}: {:?}", result.code(), result.messages());
    Ok(())
}
