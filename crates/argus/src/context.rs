//! Follow-up camera context
//!
//! Remembers the last camera a vision action resolved, per session, so a
//! follow-up like "what's happening" needs no camera name. Slots never
//! expire; concurrent requests inside one session race last-writer-wins,
//! which is the accepted behavior rather than a bug to lock away.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

/// Session key used when a caller does not supply one.
pub const DEFAULT_SESSION: &str = "default";

#[derive(Clone, Default)]
pub struct ContextStore {
    last_camera: Arc<RwLock<HashMap<String, String>>>,
}

impl ContextStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn last_camera(&self, session: &str) -> Option<String> {
        self.last_camera.read().await.get(session).cloned()
    }

    pub async fn set_last_camera(&self, session: &str, camera_name: &str) {
        self.last_camera
            .write()
            .await
            .insert(session.to_string(), camera_name.to_string());
    }
}
