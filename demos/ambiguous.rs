//! Two accounts share an email address. Shows both ways of dealing with that: allowing
//! ambiguity, or narrowing the lookup select.

use tableauth::auth::{Adapter, CallbackCheckAdapter};
use tableauth::query::GenericBuilder;
use tableauth_sqlite::SqliteDatabase;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let db = SqliteDatabase::open_in_memory()?;
    db.execute_batch(
        r#"CREATE TABLE user (id INTEGER PRIMARY KEY, email TEXT, password TEXT, is_active INTEGER, is_admin INTEGER);
           INSERT INTO user VALUES (2, 'dorian-conn@yahoo.com', 'f;qc35lyp0wAd-', 1, 0);
           INSERT INTO user VALUES (3, 'dorian-conn@yahoo.com', '277hpQ#5G"Md!', 1, 1);"#,
    )?;

    let mut adapter = CallbackCheckAdapter::new(db, GenericBuilder::new())
        .with_table_name("user")
        .with_identity_column("email")
        .with_credential_column("password");

    // Without ambiguity allowed this is IdentityAmbiguous.
    let result = adapter
        .set_identity("dorian-conn@yahoo.com")
        .set_credential("f;qc35lyp0wAd-")
        .authenticate()
        .await?;
    println!("strict: {}", result.code());

    // Method 1: try every matching row until one accepts the credential.
    adapter.set_ambiguity_identity(true);
    let result = adapter.authenticate().await?;
    println!("ambiguity allowed: {}", result.code());

    // Method 2: only consider administrators.
    adapter.set_ambiguity_identity(false);
    adapter.db_select().where_().equals("is_admin", 1).end();
    let result = adapter.set_credential("277hpQ#5G\"Md!").authenticate().await?;
    println!("admins only: {}", result.code());
    Ok(())
}
