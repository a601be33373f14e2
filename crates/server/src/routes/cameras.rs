use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json as ResponseJson,
    routing::get,
    Json, Router,
};
use db::models::camera::{Camera, CreateCamera, UpdateCamera};
use deployment::Deployment;
use serde::Deserialize;
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{error::ApiError, DeploymentImpl};

#[derive(Debug, Deserialize)]
pub struct CameraListQuery {
    pub place_id: Option<Uuid>,
}

pub async fn get_cameras(
    State(deployment): State<DeploymentImpl>,
    Query(query): Query<CameraListQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<Camera>>>, ApiError> {
    let pool = &deployment.db().pool;
    let cameras = match query.place_id {
        Some(place_id) => Camera::find_by_place(pool, place_id).await?,
        None => Camera::list(pool).await?,
    };
    Ok(ResponseJson(ApiResponse::success(cameras)))
}

pub async fn create_camera(
    State(deployment): State<DeploymentImpl>,
    Json(payload): Json<CreateCamera>,
) -> Result<ResponseJson<ApiResponse<Camera>>, ApiError> {
    let camera = Camera::create(&deployment.db().pool, &payload, Uuid::new_v4()).await?;
    Ok(ResponseJson(ApiResponse::success(camera)))
}

pub async fn update_camera(
    State(deployment): State<DeploymentImpl>,
    Path(camera_id): Path<Uuid>,
    Json(payload): Json<UpdateCamera>,
) -> Result<ResponseJson<ApiResponse<Camera>>, ApiError> {
    let camera = Camera::update(&deployment.db().pool, camera_id, &payload)
        .await?
        .ok_or_else(|| ApiError::NotFound("Camera not found".to_string()))?;
    Ok(ResponseJson(ApiResponse::success(camera)))
}

pub async fn delete_camera(
    State(deployment): State<DeploymentImpl>,
    Path(camera_id): Path<Uuid>,
) -> Result<(StatusCode, ResponseJson<ApiResponse<()>>), ApiError> {
    let rows_affected = Camera::delete(&deployment.db().pool, camera_id).await?;

    if rows_affected == 0 {
        return Err(ApiError::NotFound("Camera not found".to_string()));
    }

    Ok((StatusCode::OK, ResponseJson(ApiResponse::success(()))))
}

pub fn router() -> Router<DeploymentImpl> {
    Router::new()
        .route("/cameras", get(get_cameras).post(create_camera))
        .route(
            "/cameras/{camera_id}",
            axum::routing::delete(delete_camera).patch(update_camera),
        )
}
