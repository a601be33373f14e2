use axum::{
    routing::{get, IntoMakeService},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::DeploymentImpl;

pub mod cameras;
pub mod health;
pub mod places;
pub mod voice;

pub fn app(deployment: DeploymentImpl) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let base_routes = Router::new()
        .route("/health", get(health::health_check))
        .merge(voice::router())
        .merge(places::router())
        .merge(cameras::router())
        .with_state(deployment);

    Router::new()
        .route("/", get(health::health_check))
        .nest("/api", base_routes)
        .layer(cors)
}

pub fn router(deployment: DeploymentImpl) -> IntoMakeService<Router> {
    app(deployment).into_make_service()
}
