use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json as ResponseJson,
    routing::get,
    Json, Router,
};
use db::models::place::{CreatePlace, Place};
use deployment::Deployment;
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{error::ApiError, DeploymentImpl};

pub async fn get_places(
    State(deployment): State<DeploymentImpl>,
) -> Result<ResponseJson<ApiResponse<Vec<Place>>>, ApiError> {
    let places = Place::list(&deployment.db().pool).await?;
    Ok(ResponseJson(ApiResponse::success(places)))
}

pub async fn create_place(
    State(deployment): State<DeploymentImpl>,
    Json(payload): Json<CreatePlace>,
) -> Result<ResponseJson<ApiResponse<Place>>, ApiError> {
    let place = Place::create(&deployment.db().pool, &payload, Uuid::new_v4()).await?;
    Ok(ResponseJson(ApiResponse::success(place)))
}

pub async fn delete_place(
    State(deployment): State<DeploymentImpl>,
    Path(place_id): Path<Uuid>,
) -> Result<(StatusCode, ResponseJson<ApiResponse<()>>), ApiError> {
    let rows_affected = Place::delete(&deployment.db().pool, place_id).await?;

    if rows_affected == 0 {
        return Err(ApiError::NotFound("Place not found".to_string()));
    }

    Ok((StatusCode::OK, ResponseJson(ApiResponse::success(()))))
}

pub fn router() -> Router<DeploymentImpl> {
    Router::new()
        .route("/places", get(get_places).post(create_place))
        .route("/places/{place_id}", axum::routing::delete(delete_place))
}
