//! Voice and text command routes
//!
//! Both endpoints share one pipeline: transcript → keyword fast path →
//! (optionally) language-model slow path → executor. The model is only
//! consulted when the keyword table has no answer.

use argus::{
    interpret, keyword_match, ActionKind, Command, ExecutionResult, DEFAULT_SESSION, SYSTEM_PROMPT,
};
use axum::{
    body::Bytes,
    extract::{Multipart, State},
    response::Json as ResponseJson,
    routing::post,
    Json, Router,
};
use deployment::Deployment;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use ts_rs::TS;

use crate::{error::ApiError, DeploymentImpl};

/// Result of a full voice/text command round trip.
#[derive(Debug, Serialize)]
pub struct CommandResponse {
    pub spoken_text: String,
    pub command: Command,
    pub execution: ExecutionResult,
}

/// Either the full round trip, or the early failure shape the clients
/// already understand (`{success: false, error}`).
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum VoicePipelineResponse {
    Completed(CommandResponse),
    Failed { success: bool, error: String },
}

impl VoicePipelineResponse {
    fn failed(error: &str) -> Self {
        Self::Failed {
            success: false,
            error: error.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, TS)]
pub struct TextCommandRequest {
    pub text: Option<String>,
    pub session_id: Option<String>,
}

/// POST /api/voice — multipart audio upload.
pub async fn voice_command(
    State(deployment): State<DeploymentImpl>,
    mut multipart: Multipart,
) -> Result<ResponseJson<VoicePipelineResponse>, ApiError> {
    let mut audio: Option<Bytes> = None;
    let mut session_id: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => audio = Some(field.bytes().await?),
            Some("session_id") => session_id = Some(field.text().await?),
            _ => {}
        }
    }

    let Some(audio) = audio else {
        return Err(ApiError::BadRequest("No audio file provided".to_string()));
    };

    // Transcription failures surface as the empty transcript: no command
    // available, not a server error.
    let transcript = match deployment.stt().transcribe_audio(&audio).await {
        Ok(text) => text,
        Err(e) => {
            warn!("transcription failed: {}", e);
            String::new()
        }
    };

    if transcript.is_empty() {
        return Ok(ResponseJson(VoicePipelineResponse::failed(
            "Could not transcribe audio",
        )));
    }

    info!("voice transcript: {}", transcript);

    let session = session_id.unwrap_or_else(|| DEFAULT_SESSION.to_string());
    let response = run_pipeline(&deployment, &session, &transcript).await;
    Ok(ResponseJson(VoicePipelineResponse::Completed(response)))
}

/// POST /api/command — browser STT already produced text.
pub async fn text_command(
    State(deployment): State<DeploymentImpl>,
    Json(payload): Json<TextCommandRequest>,
) -> Result<ResponseJson<VoicePipelineResponse>, ApiError> {
    let transcript = payload.text.unwrap_or_default().trim().to_string();

    if transcript.is_empty() {
        return Ok(ResponseJson(VoicePipelineResponse::failed(
            "No text provided",
        )));
    }

    info!("text transcript: {}", transcript);

    let session = payload
        .session_id
        .unwrap_or_else(|| DEFAULT_SESSION.to_string());
    let response = run_pipeline(&deployment, &session, &transcript).await;
    Ok(ResponseJson(VoicePipelineResponse::Completed(response)))
}

async fn run_pipeline(
    deployment: &DeploymentImpl,
    session: &str,
    transcript: &str,
) -> CommandResponse {
    let command = match keyword_match(transcript) {
        Some(command) if command.action != ActionKind::Unknown => {
            info!("fast path matched action {}", command.action);
            command
        }
        _ => {
            info!("slow path: consulting {}", deployment.brain().name());
            let raw_output = match deployment.brain().complete(SYSTEM_PROMPT, transcript).await {
                Ok(output) => output,
                Err(e) => {
                    warn!("language model call failed: {}", e);
                    String::new()
                }
            };
            interpret(&raw_output, transcript)
        }
    };

    let execution = deployment.executor().execute(session, &command).await;

    CommandResponse {
        spoken_text: transcript.to_string(),
        command,
        execution,
    }
}

pub fn router() -> Router<DeploymentImpl> {
    Router::new()
        .route("/voice", post(voice_command))
        .route("/command", post(text_command))
}
