use crate::device::DeviceInfo;
use crate::error::SenseResult;
use crate::player::PlayerStyle;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Answers remembered between runs so the player isn't asked twice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    pub player_style: Option<PlayerStyle>,
    pub device: Option<DeviceInfo>,
}

pub trait SessionStore {
    fn load(&self) -> SenseResult<Session>;
    fn save(&self, session: &Session) -> SenseResult<()>;

    /// Like `load`, but an unreadable session is logged and treated as empty.
    fn load_or_default(&self) -> Session {
        self.load().unwrap_or_else(|e| {
            warn!("Failed to load session: {}", e);
            Session::default()
        })
    }
}

pub struct JsonSessionStore {
    path: PathBuf,
}

impl JsonSessionStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl SessionStore for JsonSessionStore {
    fn load(&self) -> SenseResult<Session> {
        if !self.path.exists() {
            return Ok(Session::default());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, session: &Session) -> SenseResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(session)?)?;
        Ok(())
    }
}
