use anyhow::Error as AnyhowError;
use deployment::{Deployment, DeploymentError};
use server::{routes, DeploymentImpl};
use sqlx::Error as SqlxError;
use thiserror::Error;
use tracing_subscriber::{prelude::*, EnvFilter};
use utils::assets::asset_dir;

#[derive(Debug, Error)]
pub enum ArgusServerError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Sqlx(#[from] SqlxError),
    #[error(transparent)]
    Deployment(#[from] DeploymentError),
    #[error(transparent)]
    Other(#[from] AnyhowError),
}

#[tokio::main]
async fn main() -> Result<(), ArgusServerError> {
    // Load environment variables from `.env` if present so local development
    // picks up API keys
    dotenv::dotenv().ok();

    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let filter_string = format!(
        "warn,server={level},db={level},services={level},deployment={level},local_deployment={level},argus={level},utils={level}",
        level = log_level
    );
    let env_filter = EnvFilter::try_new(filter_string).expect("Failed to create tracing filter");
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(env_filter))
        .init();

    // Create asset directory if it doesn't exist
    if !asset_dir().exists() {
        std::fs::create_dir_all(asset_dir())?;
    }

    let deployment = DeploymentImpl::new().await?;

    if !deployment.stt().is_ready() {
        tracing::warn!(
            "Deepgram not configured - voice uploads will fail until DEEPGRAM_API_KEY is set"
        );
    }
    tracing::info!("Language model fallback: {}", deployment.brain().name());

    let app_router = routes::router(deployment);

    let port = std::env::var("BACKEND_PORT")
        .or_else(|_| std::env::var("PORT"))
        .ok()
        .and_then(|s| s.trim().parse::<u16>().ok())
        .unwrap_or(8000);

    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let listener = tokio::net::TcpListener::bind(format!("{host}:{port}")).await?;
    let actual_port = listener.local_addr()?.port();

    tracing::info!("Server running on http://{host}:{actual_port}");

    axum::serve(listener, app_router).await?;
    Ok(())
}
