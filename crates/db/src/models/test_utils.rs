use std::str::FromStr;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use uuid::Uuid;

use super::place::{CreatePlace, Place};

pub(crate) async fn setup_test_pool() -> SqlitePool {
    // One connection per pool keeps the private in-memory database alive
    // and isolated from concurrently running tests.
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("invalid sqlite config")
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("failed to open sqlite memory db");

    bootstrap_schema(&pool).await;

    pool
}

async fn bootstrap_schema(pool: &SqlitePool) {
    let statements = [
        r#"
        CREATE TABLE IF NOT EXISTS places (
            id BLOB PRIMARY KEY,
            name TEXT NOT NULL,
            location TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL DEFAULT '',
            camera_count INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT (datetime('now','subsec')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now','subsec'))
        );
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS cameras (
            id BLOB PRIMARY KEY,
            name TEXT NOT NULL,
            stream_url TEXT NOT NULL DEFAULT '',
            camera_type TEXT NOT NULL DEFAULT 'CCTV',
            status TEXT NOT NULL DEFAULT 'offline',
            place_id BLOB REFERENCES places(id) ON DELETE SET NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now','subsec')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now','subsec'))
        );
        "#,
    ];

    for statement in statements {
        sqlx::query(statement)
            .execute(pool)
            .await
            .expect("failed to bootstrap schema");
    }
}

pub(crate) async fn create_test_place(pool: &SqlitePool, name: &str) -> Uuid {
    let place_id = Uuid::new_v4();
    let data = CreatePlace {
        name: name.to_string(),
        location: None,
        description: None,
    };

    Place::create(pool, &data, place_id)
        .await
        .expect("failed to create test place");

    place_id
}
