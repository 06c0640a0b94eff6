use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;

fn fixture() -> SqliteDatabase {
    let db = SqliteDatabase::open_in_memory().unwrap();
    db.execute_batch(
        "CREATE TABLE user (id INTEGER PRIMARY KEY, email TEXT NOT NULL, password TEXT, score REAL, avatar BLOB);
         INSERT INTO user (id, email, password, score, avatar) VALUES (1, 'a@x.com', 'secret', 1.5, x'0102');
         INSERT INTO user (id, email, password, score, avatar) VALUES (2, 'b@x.com', NULL, NULL, NULL);",
    )
    .unwrap();
    db
}

#[tokio::test]
async fn rows_keep_select_order_and_types() {
    let db = fixture();
    let mut values = BoundValues::new();
    values.push(":v1", "a@x.com");

    let rows = db.get("SELECT user.* FROM user WHERE (user.email = :v1)", &values).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].columns().collect::<Vec<_>>(), vec!["id", "email", "password", "score", "avatar"]);
    assert_eq!(
        rows[0].clone().into_json(),
        json!({"id": 1, "email": "a@x.com", "password": "secret", "score": 1.5, "avatar": "AQI="})
    );
}

#[tokio::test]
async fn selected_columns_are_named_plainly() {
    let db = fixture();
    let rows = db.get("SELECT user.email, user.password FROM user ORDER BY user.id", &BoundValues::new()).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].clone().into_json(), json!({"email": "b@x.com", "password": null}));
}

#[tokio::test]
async fn binds_numbers_and_booleans() {
    let db = fixture();
    let mut values = BoundValues::new();
    values.push(":v1", 2);
    values.push(":v2", true);

    let rows = db
        .get("SELECT user.id FROM user WHERE (user.id = :v1) AND (user.id > :v2)", &values)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("id"), Some(&json!(2)));
}

#[tokio::test]
async fn no_match_is_empty() {
    let db = fixture();
    let mut values = BoundValues::new();
    values.push(":v1", "nobody@x.com");
    assert!(db.get("SELECT user.* FROM user WHERE (user.email = :v1)", &values).await.unwrap().is_empty());
}

#[tokio::test]
async fn failures_are_errors() {
    let db = fixture();
    assert!(db.get("SELECT usr.* FROM usr", &BoundValues::new()).await.is_err());
    assert!(db.get("SELEKT 1", &BoundValues::new()).await.is_err());

    let mut values = BoundValues::new();
    values.push(":missing", 1);
    assert!(db.get("SELECT user.* FROM user", &values).await.is_err());
}

#[test]
fn to_sql_mapping() {
    assert_eq!(to_sql(&json!(null)), SqlValue::Null);
    assert_eq!(to_sql(&json!(false)), SqlValue::Integer(0));
    assert_eq!(to_sql(&json!(7)), SqlValue::Integer(7));
    assert_eq!(to_sql(&json!(0.25)), SqlValue::Real(0.25));
    assert_eq!(to_sql(&json!("x")), SqlValue::Text("x".into()));
    assert_eq!(to_sql(&json!(i64::MAX)), SqlValue::Integer(i64::MAX));
    assert_eq!(to_sql(&json!(u64::MAX)), SqlValue::Text("18446744073709551615".into()));
}

#[tokio::test]
async fn large_unsigned_values_match_exactly() {
    let db = fixture();
    db.execute_batch("INSERT INTO user (id, email, password) VALUES (3, '18446744073709551615', 'big');")
        .unwrap();
    let mut values = BoundValues::new();
    values.push(":v1", u64::MAX);

    let rows = db.get("SELECT user.password FROM user WHERE (user.email = :v1)", &values).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("password"), Some(&json!("big")));
}

fn batch_into_plain_box(db: &SqliteDatabase, sql: &str) -> Result<(), Box<dyn std::error::Error>> {
    db.execute_batch(sql)?;
    Ok(())
}

#[test]
fn batch_errors_convert_into_any_error_box() {
    let db = fixture();
    assert!(batch_into_plain_box(&db, "CREATE TABLE role (name TEXT);").is_ok());
    assert!(batch_into_plain_box(&db, "CREATE TABEL oops;").is_err());
}
