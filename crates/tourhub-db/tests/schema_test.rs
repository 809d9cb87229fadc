//! Integration tests for schema initialization using in-memory SurrealDB.

use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    db
}

#[tokio::test]
async fn schema_migration_applies_successfully() {
    let db = setup().await;
    tourhub_db::run_migrations(&db).await.unwrap();

    let mut result = db.query("INFO FOR DB").await.unwrap();
    let info: Option<surrealdb_types::Value> = result.take(0).unwrap();
    let info = info.expect("INFO FOR DB should return a value");
    let info_str = format!("{:?}", info);

    for table in ["user", "package", "booking", "wishlist", "review", "_migration"] {
        assert!(info_str.contains(table), "missing {table} table");
    }
}

#[tokio::test]
async fn migration_is_idempotent() {
    let db = setup().await;

    tourhub_db::run_migrations(&db).await.unwrap();
    tourhub_db::run_migrations(&db).await.unwrap();

    let mut result = db.query("SELECT * FROM _migration").await.unwrap();
    let records: Vec<surrealdb_types::Value> = result.take(0).unwrap();
    assert_eq!(records.len(), 1, "expected exactly one migration record");
}

#[tokio::test]
async fn unique_index_prevents_duplicate_emails() {
    let db = setup().await;
    tourhub_db::run_migrations(&db).await.unwrap();

    db.query("CREATE user SET email = 't@x.com', name = 'Tess'")
        .await
        .unwrap()
        .check()
        .unwrap();

    let result = db
        .query("CREATE user SET email = 't@x.com', name = 'Other Tess'")
        .await
        .unwrap()
        .check();

    assert!(result.is_err(), "duplicate email should be rejected");
}

#[tokio::test]
async fn invalid_trip_status_is_rejected() {
    let db = setup().await;
    tourhub_db::run_migrations(&db).await.unwrap();

    let result = db
        .query(
            "CREATE booking SET \
             package_id = 'p', package_title = 'Hike', price = 10.0, \
             tourist_email = 't@x.com', tourist_name = 'Tess', \
             guide_id = 'g', guide_name = 'Gil', \
             tour_date = time::now(), status = 'teleported'",
        )
        .await
        .unwrap()
        .check();

    assert!(result.is_err(), "unknown status should fail the ASSERT");
}
