use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool, Type};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Type, Serialize, Deserialize, PartialEq, TS)]
#[ts(export)]
#[sqlx(type_name = "camera_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CameraStatus {
    Online,
    Offline,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Camera {
    pub id: Uuid,
    pub name: String,
    pub stream_url: String,
    pub camera_type: String,
    pub status: CameraStatus,
    pub place_id: Option<Uuid>,
    #[ts(type = "Date")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "Date")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct CreateCamera {
    pub name: String,
    pub stream_url: Option<String>,
    pub camera_type: Option<String>,
    pub status: Option<CameraStatus>,
    pub place_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct UpdateCamera {
    pub name: Option<String>,
    pub stream_url: Option<String>,
    pub camera_type: Option<String>,
    pub status: Option<CameraStatus>,
}

impl Camera {
    pub async fn create(
        pool: &SqlitePool,
        data: &CreateCamera,
        id: Uuid,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO cameras (id, name, stream_url, camera_type, status, place_id)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(data.stream_url.as_deref().unwrap_or(""))
        .bind(data.camera_type.as_deref().unwrap_or("CCTV"))
        .bind(data.status.unwrap_or(CameraStatus::Offline))
        .bind(data.place_id)
        .execute(pool)
        .await?;

        Self::find_by_id(pool, id).await?.ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Camera>(
            r#"
            SELECT * FROM cameras WHERE id = ?
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
        sqlx::query_as::<_, Camera>(
            r#"
            SELECT * FROM cameras
            WHERE name LIKE '%' || ? || '%'
            ORDER BY created_at, rowid
            LIMIT 1
            "#,
        )
        .bind(fragment)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_by_place(
        pool: &SqlitePool,
        place_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Camera>(
            r#"
            SELECT * FROM cameras WHERE place_id = ? ORDER BY created_at, rowid
            "#,
        )
        .bind(place_id)
        .fetch_all(pool)
        .await
    }

    pub async fn list(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Camera>(
            r#"
            SELECT * FROM cameras ORDER BY created_at, rowid
            "#,
        )
        .fetch_all(pool)
        .await
    }

    /// Patch-style update: only the provided fields change.
    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        updates: &UpdateCamera,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE cameras
            SET name = COALESCE(?, name),
                stream_url = COALESCE(?, stream_url),
                camera_type = COALESCE(?, camera_type),
                status = COALESCE(?, status),
                updated_at = datetime('now', 'subsec')
            WHERE id = ?
            "#,
        )
        .bind(updates.name.as_deref())
        .bind(updates.stream_url.as_deref())
        .bind(updates.camera_type.as_deref())
        .bind(updates.status)
        .bind(id)
        .execute(pool)
        .await?;

        Self::find_by_id(pool, id).await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM cameras WHERE id = ?
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
    use crate::models::test_utils::{create_test_place, setup_test_pool};

    fn minimal_camera(name: &str) -> CreateCamera {
        CreateCamera {
            name: name.to_string(),
            stream_url: None,
            camera_type: None,
            status: None,
            place_id: None,
        }
    }

    #[tokio::test]
    async fn create_applies_catalog_defaults() {
        let pool = setup_test_pool().await;

        let camera = Camera::create(&pool, &minimal_camera("Gate Cam"), Uuid::new_v4())
            .await
            .expect("create camera");

        assert_eq!(camera.name, "Gate Cam");
        assert_eq!(camera.stream_url, "");
        assert_eq!(camera.camera_type, "CCTV");
        assert_eq!(camera.status, CameraStatus::Offline);
        assert!(camera.place_id.is_none());
    }

    #[tokio::test]
    async fn filter_by_place() {
        let pool = setup_test_pool().await;
        let place_id = create_test_place(&pool, "Lobby").await;

        let mut attached = minimal_camera("Lobby Cam");
        attached.place_id = Some(place_id);
        Camera::create(&pool, &attached, Uuid::new_v4()).await.expect("create camera");
        Camera::create(&pool, &minimal_camera("Roof Cam"), Uuid::new_v4())
            .await
            .expect("create camera");

        let cameras = Camera::find_by_place(&pool, place_id).await.expect("query");
        assert_eq!(cameras.len(), 1);
        assert_eq!(cameras[0].name, "Lobby Cam");
    }

    #[tokio::test]
    async fn update_touches_only_provided_fields() {
        let pool = setup_test_pool().await;
        let camera = Camera::create(&pool, &minimal_camera("Dock Cam"), Uuid::new_v4())
            .await
            .expect("create camera");

        let updated = Camera::update(
            &pool,
            camera.id,
            &UpdateCamera {
                name: None,
                stream_url: Some("rtsp://dock/stream".to_string()),
                camera_type: None,
                status: Some(CameraStatus::Online),
            },
        )
        .await
        .expect("update")
        .expect("camera still present");

        assert_eq!(updated.name, "Dock Cam");
        assert_eq!(updated.stream_url, "rtsp://dock/stream");
        assert_eq!(updated.camera_type, "CCTV");
        assert_eq!(updated.status, CameraStatus::Online);
    }

    #[tokio::test]
    async fn name_lookup_prefers_oldest_match() {
        let pool = setup_test_pool().await;
        Camera::create(&pool, &minimal_camera("Gate Cam"), Uuid::new_v4())
            .await
            .expect("create camera");
        Camera::create(&pool, &minimal_camera("Gate Cam 2"), Uuid::new_v4())
            .await
            .expect("create camera");

        let hit = Camera::find_by_name_like(&pool, "gate cam")
            .await
            .expect("query")
            .expect("match");
        assert_eq!(hit.name, "Gate Cam");
    }
}
