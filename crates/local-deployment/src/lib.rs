use std::sync::Arc;

use argus::{
    CommandExecutor, CompletionProvider, ContextStore, DeepgramStt, HttpVisionAnalyzer,
    OllamaProvider, SpeechToText, SttConfig, VisionAnalyzer,
};
use async_trait::async_trait;
use db::DBService;
use deployment::{Deployment, DeploymentError};
use services::services::config::{load_config_from_file, save_config_to_file, Config};
use tokio::sync::RwLock;
use utils::assets::config_path;

#[derive(Clone)]
pub struct LocalDeployment {
    config: Arc<RwLock<Config>>,
    db: DBService,
    stt: Arc<dyn SpeechToText>,
    brain: Arc<dyn CompletionProvider>,
    vision: Arc<dyn VisionAnalyzer>,
    contexts: ContextStore,
    executor: CommandExecutor,
}

#[async_trait]
impl Deployment for LocalDeployment {
    async fn new() -> Result<Self, DeploymentError> {
        let raw_config = load_config_from_file(&config_path()).await;

        // Persist the defaulted/migrated config so the file always reflects
        // what the process is actually running with.
        save_config_to_file(&raw_config, &config_path()).await?;

        let db = DBService::new().await?;
        let contexts = ContextStore::new();

        let stt: Arc<dyn SpeechToText> = Arc::new(DeepgramStt::new(SttConfig {
            api_key: raw_config.stt.api_key.clone(),
            model: raw_config.stt.model.clone(),
            language: raw_config.stt.language.clone(),
        }));
        let brain: Arc<dyn CompletionProvider> = Arc::new(OllamaProvider::new(
            raw_config.llm.base_url.clone(),
            raw_config.llm.model.clone(),
        ));
        let vision: Arc<dyn VisionAnalyzer> =
            Arc::new(HttpVisionAnalyzer::new(raw_config.vision.base_url.clone()));

        let executor = CommandExecutor::new(db.pool.clone(), contexts.clone(), vision.clone());

        Ok(Self {
            config: Arc::new(RwLock::new(raw_config)),
            db,
            stt,
            brain,
            vision,
            contexts,
            executor,
        })
    }

    fn config(&self) -> &Arc<RwLock<Config>> {
        &self.config
    }

    fn db(&self) -> &DBService {
        &self.db
    }

    fn stt(&self) -> &Arc<dyn SpeechToText> {
        &self.stt
    }

    fn brain(&self) -> &Arc<dyn CompletionProvider> {
        &self.brain
    }

    fn vision(&self) -> &Arc<dyn VisionAnalyzer> {
        &self.vision
    }

    fn contexts(&self) -> &ContextStore {
        &self.contexts
    }

    fn executor(&self) -> &CommandExecutor {
        &self.executor
    }
}
