//! Vision-analysis collaborator
//!
//! The executor hands a camera's stream URL plus the full command to an
//! external VLM service; its payload is surfaced as-is under the `vision`
//! output type. Transport failures become error envelopes at this boundary
//! and never propagate further.

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::command::Command;
use crate::executor::{CommandOutput, ExecutionResult};

#[async_trait]
pub trait VisionAnalyzer: Send + Sync {
    async fn analyze(&self, stream_url: &str, command: &Command) -> ExecutionResult;
}

pub struct HttpVisionAnalyzer {
    client: reqwest::Client,
    base_url: String,
}

impl HttpVisionAnalyzer {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl VisionAnalyzer for HttpVisionAnalyzer {
    async fn analyze(&self, stream_url: &str, command: &Command) -> ExecutionResult {
        info!("vision analysis ({}) on {}", command.action, stream_url);

        let payload = json!({
            "stream_url": stream_url,
            "command": command,
        });

        let response = match self
            .client
            .post(format!("{}/analyze", self.base_url))
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("vision service unreachable: {}", e);
                return ExecutionResult::err(format!("Vision service unavailable: {}", e));
            }
        };

        if !response.status().is_success() {
            return ExecutionResult::err(format!("Vision service error: {}", response.status()));
        }

        match response.json::<serde_json::Value>().await {
            Ok(data) => ExecutionResult::ok(CommandOutput::Vision { data }),
            Err(e) => ExecutionResult::err(format!("Vision response parse error: {}", e)),
        }
    }
}
