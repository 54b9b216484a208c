//! Integration tests for the server repository against a live Postgres.

use chrono::NaiveDate;
use rackledger_db::models::server::NewServer;
use rackledger_db::repositories::ServerRepo;
use sqlx::PgPool;

fn new_server(name: &str) -> NewServer {
    NewServer {
        server_name: name.to_string(),
        ip: "10.0.0.1".to_string(),
        purpose: "app tier".to_string(),
        os: "Ubuntu 22.04".to_string(),
        status: "Active".to_string(),
        allocated_date: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
        surrendered_date: None,
        category: "Product".to_string(),
        owner: "Platform".to_string(),
        backup_type: "Full".to_string(),
        backup_frequency: "Daily".to_string(),
        remarks: None,
        additional_remarks: None,
    }
}

#[sqlx::test]
async fn upsert_inserts_then_lists(pool: PgPool) {
    let row = ServerRepo::upsert(&pool, &new_server("app-01")).await.unwrap();
    assert_eq!(row.server_name, "app-01");
    assert!(row.id > 0);

    let rows = ServerRepo::list_all(&pool).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].server_name, "app-01");
}

#[sqlx::test]
async fn upsert_replaces_by_case_insensitive_name(pool: PgPool) {
    let first = ServerRepo::upsert(&pool, &new_server("app-01")).await.unwrap();

    let mut replacement = new_server("APP-01");
    replacement.ip = "10.0.0.2".to_string();
    replacement.status = "Decommissioned".to_string();
    replacement.surrendered_date = NaiveDate::from_ymd_opt(2025, 6, 1);
    let second = ServerRepo::upsert(&pool, &replacement).await.unwrap();

    // Same logical record, new casing and fields.
    assert_eq!(second.id, first.id);
    assert_eq!(second.server_name, "APP-01");
    assert_eq!(second.ip, "10.0.0.2");
    assert_eq!(second.status, "Decommissioned");
    assert_eq!(ServerRepo::count(&pool).await.unwrap(), 1);
}

#[sqlx::test]
async fn whitespace_padded_name_hits_the_same_key(pool: PgPool) {
    ServerRepo::upsert(&pool, &new_server("app-01")).await.unwrap();
    ServerRepo::upsert(&pool, &new_server("  app-01  ")).await.unwrap();
    assert_eq!(ServerRepo::count(&pool).await.unwrap(), 1);
}

#[sqlx::test]
async fn list_orders_by_name_in_byte_order(pool: PgPool) {
    for name in ["beta", "Alpha", "alpha-2", "ZULU"] {
        ServerRepo::upsert(&pool, &new_server(name)).await.unwrap();
    }
    let names: Vec<String> = ServerRepo::list_all(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.server_name)
        .collect();
    // Uppercase sorts before lowercase under byte order.
    assert_eq!(names, vec!["Alpha", "ZULU", "alpha-2", "beta"]);
}

#[sqlx::test]
async fn upsert_batch_is_transactional(pool: PgPool) {
    let batch = vec![new_server("db-01"), new_server("db-02"), new_server("db-03")];
    let written = ServerRepo::upsert_batch(&pool, &batch).await.unwrap();
    assert_eq!(written, 3);
    assert_eq!(ServerRepo::count(&pool).await.unwrap(), 3);
}

#[sqlx::test]
async fn delete_by_name_is_case_insensitive(pool: PgPool) {
    ServerRepo::upsert(&pool, &new_server("app-01")).await.unwrap();

    assert!(ServerRepo::delete_by_name(&pool, " APP-01 ").await.unwrap());
    assert_eq!(ServerRepo::count(&pool).await.unwrap(), 0);

    // Second delete finds nothing.
    assert!(!ServerRepo::delete_by_name(&pool, "app-01").await.unwrap());
}

#[sqlx::test]
async fn delete_all_clears_the_set(pool: PgPool) {
    for name in ["a", "b", "c"] {
        ServerRepo::upsert(&pool, &new_server(name)).await.unwrap();
    }
    assert_eq!(ServerRepo::delete_all(&pool).await.unwrap(), 3);
    assert!(ServerRepo::list_all(&pool).await.unwrap().is_empty());
}
