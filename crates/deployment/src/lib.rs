use std::sync::Arc;

use anyhow::Error as AnyhowError;
use argus::{CommandExecutor, CompletionProvider, ContextStore, SpeechToText, VisionAnalyzer};
use async_trait::async_trait;
use db::DBService;
use services::services::config::{Config, ConfigError};
use sqlx::Error as SqlxError;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error)]
pub enum DeploymentError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Sqlx(#[from] SqlxError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Other(#[from] AnyhowError),
}

/// Everything a request handler needs, behind one cloneable handle.
#[async_trait]
pub trait Deployment: Clone + Send + Sync + 'static {
    async fn new() -> Result<Self, DeploymentError>;

    fn config(&self) -> &Arc<RwLock<Config>>;

    fn db(&self) -> &DBService;

    fn stt(&self) -> &Arc<dyn SpeechToText>;

    fn brain(&self) -> &Arc<dyn CompletionProvider>;

    fn vision(&self) -> &Arc<dyn VisionAnalyzer>;

    fn contexts(&self) -> &ContextStore;

    fn executor(&self) -> &CommandExecutor;
}
