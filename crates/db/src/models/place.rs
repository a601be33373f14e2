use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Place {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub description: String,
    pub camera_count: i64,
    #[ts(type = "Date")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "Date")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct CreatePlace {
    pub name: String,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl Place {
    pub async fn create(
        pool: &SqlitePool,
        data: &CreatePlace,
        id: Uuid,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO places (id, name, location, description, camera_count)
            VALUES (?, ?, ?, ?, 0)
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(data.location.as_deref().unwrap_or(""))
        .bind(data.description.as_deref().unwrap_or(""))
        .execute(pool)
        .await?;

        Self::find_by_id(pool, id).await?.ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Place>(
            r#"
            SELECT * FROM places WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Case-insensitive substring lookup; the oldest matching row wins so
    /// repeated resolutions stay stable.
    pub async fn find_by_name_like(
        pool: &SqlitePool,
        fragment: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Place>(
            r#"
            SELECT * FROM places
            WHERE name LIKE '%' || ? || '%'
            ORDER BY created_at, rowid
            LIMIT 1
            "#,
        )
        .bind(fragment)
        .fetch_optional(pool)
        .await
    }

    pub async fn list(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Place>(
            r#"
            SELECT * FROM places ORDER BY created_at, rowid
            "#,
        )
        .fetch_all(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM places WHERE id = ?
            "#,
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_utils::setup_test_pool;

    #[tokio::test]
    async fn create_then_find_by_id() {
        let pool = setup_test_pool().await;
        let id = Uuid::new_v4();
        let data = CreatePlace {
            name: "Main Gate".to_string(),
            location: Some("North side".to_string()),
            description: None,
        };

        let place = Place::create(&pool, &data, id).await.expect("create place");
        assert_eq!(place.id, id);
        assert_eq!(place.name, "Main Gate");
        assert_eq!(place.location, "North side");
        assert_eq!(place.description, "");
        assert_eq!(place.camera_count, 0);

        let found = Place::find_by_id(&pool, id).await.expect("query");
        assert_eq!(found.map(|p| p.name), Some("Main Gate".to_string()));
    }

    #[tokio::test]
    async fn name_lookup_is_case_insensitive_substring() {
        let pool = setup_test_pool().await;
        let data = CreatePlace {
            name: "Parking Lot B".to_string(),
            location: None,
            description: None,
        };
        Place::create(&pool, &data, Uuid::new_v4()).await.expect("create place");

        let hit = Place::find_by_name_like(&pool, "parking lot").await.expect("query");
        assert_eq!(hit.map(|p| p.name), Some("Parking Lot B".to_string()));

        let miss = Place::find_by_name_like(&pool, "warehouse").await.expect("query");
        assert!(miss.is_none());
    }

    #[tokio::test]
    async fn delete_reports_rows_affected() {
        let pool = setup_test_pool().await;
        let id = Uuid::new_v4();
        let data = CreatePlace {
            name: "Rooftop".to_string(),
            location: None,
            description: None,
        };
        Place::create(&pool, &data, id).await.expect("create place");

        assert_eq!(Place::delete(&pool, id).await.expect("delete"), 1);
        assert_eq!(Place::delete(&pool, id).await.expect("delete"), 0);
    }
}
