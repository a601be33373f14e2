use axum::response::Json as ResponseJson;
use utils::response::ApiResponse;

pub async fn health_check() -> ResponseJson<ApiResponse<&'static str>> {
    ResponseJson(ApiResponse::success("Argus voice backend running"))
}
