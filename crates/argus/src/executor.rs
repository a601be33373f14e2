//! Command execution
//!
//! Dispatches a normalized command against the camera/place catalog and the
//! vision collaborator. Every path yields an [`ExecutionResult`]; internal
//! failures become error envelopes instead of bubbling out of the executor.

use std::sync::Arc;

use db::models::camera::{Camera, CreateCamera};
use db::models::place::{CreatePlace, Place};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::command::{ActionKind, Command};
use crate::context::ContextStore;
use crate::vision::VisionAnalyzer;

/// Successful execution payload, discriminated by `type` on the wire.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommandOutput {
    Camera {
        data: Camera,
    },
    CameraList {
        message: String,
        cameras: Vec<Camera>,
    },
    PlaceCameras {
        place: Place,
        cameras: Vec<Camera>,
    },
    PlaceCreated {
        data: Place,
    },
    CameraCreated {
        data: Camera,
    },
    /// The vision collaborator's payload, passed through untouched.
    Vision {
        data: serde_json::Value,
    },
}

/// Uniform envelope every command execution resolves to.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionResult {
    pub success: bool,
    #[serde(flatten)]
    pub output: Option<CommandOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecutionResult {
    pub fn ok(output: CommandOutput) -> Self {
        Self {
            success: true,
            output: Some(output),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            output: None,
            error: Some(message.into()),
        }
    }
}

/// Longest contiguous word-window match against the camera catalog.
///
/// The whole phrase is tried first; after that every window of `length`
/// words is queried with `length` descending, offsets left to right, and the
/// first hit at the longest length wins. "sri lakshmi narayan" therefore
/// beats "sri lakshmi" even when both would match something.
pub async fn resolve_camera(
    pool: &SqlitePool,
    spoken_name: &str,
) -> Result<Option<Camera>, sqlx::Error> {
    if let Some(camera) = Camera::find_by_name_like(pool, spoken_name).await? {
        return Ok(Some(camera));
    }

    let words: Vec<&str> = spoken_name.split_whitespace().collect();
    for length in (1..=words.len()).rev() {
        for start in 0..=(words.len() - length) {
            let phrase = words[start..start + length].join(" ");
            if let Some(camera) = Camera::find_by_name_like(pool, &phrase).await? {
                return Ok(Some(camera));
            }
        }
    }

    Ok(None)
}

#[derive(Clone)]
pub struct CommandExecutor {
    pool: SqlitePool,
    contexts: ContextStore,
    vision: Arc<dyn VisionAnalyzer>,
}

impl CommandExecutor {
    pub fn new(pool: SqlitePool, contexts: ContextStore, vision: Arc<dyn VisionAnalyzer>) -> Self {
        Self {
            pool,
            contexts,
            vision,
        }
    }

    pub fn contexts(&self) -> &ContextStore {
        &self.contexts
    }

    /// Run a command to completion. Never returns an error: anything the
    /// dispatch cannot handle comes back as a `success: false` envelope.
    pub async fn execute(&self, session: &str, command: &Command) -> ExecutionResult {
        match self.dispatch(session, command).await {
            Ok(result) => result,
            Err(e) => {
                warn!("command execution error: {}", e);
                ExecutionResult::err(e.to_string())
            }
        }
    }

    async fn dispatch(
        &self,
        session: &str,
        command: &Command,
    ) -> Result<ExecutionResult, sqlx::Error> {
        match command.action {
            ActionKind::ShowCamera => self.show_camera(command).await,
            ActionKind::ShowPlace => self.show_place(command).await,
            ActionKind::AddPlace => self.add_place(command).await,
            ActionKind::AddCamera => self.add_camera(command).await,
            action if action.is_vision() => self.run_vision(session, command).await,
            other => Ok(ExecutionResult::err(format!("Unknown action: {}", other))),
        }
    }

    async fn show_camera(&self, command: &Command) -> Result<ExecutionResult, sqlx::Error> {
        let mut camera: Option<Camera> = None;

        // No name and no id: list everything, or open the only camera.
        if command.camera_name.is_none() && command.camera_id.is_none() {
            let all = Camera::list(&self.pool).await?;
            match all.len() {
                0 => {
                    return Ok(ExecutionResult::err(
                        "No cameras available. Add a camera first.",
                    ))
                }
                1 => camera = all.into_iter().next(),
                n => {
                    return Ok(ExecutionResult::ok(CommandOutput::CameraList {
                        message: format!("Found {} cameras. Please say a specific name.", n),
                        cameras: all,
                    }));
                }
            }
        }

        if camera.is_none() {
            if let Some(name) = command.camera_name.as_deref() {
                camera = resolve_camera(&self.pool, name).await?;
            }
        }

        // The classifier mirrors the spoken name into the id field, so an
        // exact lookup only helps when the caller really sent an id.
        if camera.is_none() {
            if let Some(id) = command.camera_id.as_deref() {
                if let Ok(id) = id.parse::<Uuid>() {
                    camera = Camera::find_by_id(&self.pool, id).await?;
                }
            }
        }

        match camera {
            Some(data) => Ok(ExecutionResult::ok(CommandOutput::Camera { data })),
            None => Ok(ExecutionResult::err("Camera not found")),
        }
    }

    async fn show_place(&self, command: &Command) -> Result<ExecutionResult, sqlx::Error> {
        let place = match command.place_name.as_deref() {
            Some(name) => Place::find_by_name_like(&self.pool, name).await?,
            None => None,
        };

        let Some(place) = place else {
            return Ok(ExecutionResult::err("Place not found"));
        };

        let cameras = Camera::find_by_place(&self.pool, place.id).await?;

        Ok(ExecutionResult::ok(CommandOutput::PlaceCameras {
            place,
            cameras,
        }))
    }

    async fn add_place(&self, command: &Command) -> Result<ExecutionResult, sqlx::Error> {
        let Some(name) = command.place_name.clone() else {
            return Ok(ExecutionResult::err("Place name not provided"));
        };

        let data = CreatePlace {
            name,
            location: None,
            description: None,
        };
        let place = Place::create(&self.pool, &data, Uuid::new_v4()).await?;
        info!("created place '{}' ({})", place.name, place.id);

        Ok(ExecutionResult::ok(CommandOutput::PlaceCreated {
            data: place,
        }))
    }

    async fn add_camera(&self, command: &Command) -> Result<ExecutionResult, sqlx::Error> {
        let name = command
            .camera_name
            .clone()
            .unwrap_or_else(|| "New Camera".to_string());

        // Attach the place link only when the spoken place actually
        // resolves; otherwise the camera is created unattached.
        let mut place_id = None;
        if let Some(place_name) = command.place_name.as_deref() {
            place_id = Place::find_by_name_like(&self.pool, place_name)
                .await?
                .map(|p| p.id);
        }

        let data = CreateCamera {
            name,
            stream_url: None,
            camera_type: None,
            status: None,
            place_id,
        };
        let camera = Camera::create(&self.pool, &data, Uuid::new_v4()).await?;
        info!("created camera '{}' ({})", camera.name, camera.id);

        Ok(ExecutionResult::ok(CommandOutput::CameraCreated {
            data: camera,
        }))
    }

    async fn run_vision(
        &self,
        session: &str,
        command: &Command,
    ) -> Result<ExecutionResult, sqlx::Error> {
        let mut camera_name = command.camera_name.clone();
        if camera_name.is_none() {
            camera_name = self.contexts.last_camera(session).await;
        }

        let Some(camera_name) = camera_name else {
            return Ok(ExecutionResult::err("Camera name not provided"));
        };

        let Some(camera) = Camera::find_by_name_like(&self.pool, &camera_name).await? else {
            return Ok(ExecutionResult::err("Camera not found"));
        };

        // Remember the resolved camera before delegating so a follow-up can
        // omit the name even when the analysis itself fails.
        self.contexts.set_last_camera(session, &camera.name).await;

        Ok(self.vision.analyze(&camera.stream_url, command).await)
    }
}
