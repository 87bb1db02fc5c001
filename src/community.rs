use crate::error::SenseResult;
use crate::games::Game;
use crate::player::Skill;
use crate::sensitivity::engine::round1;
use crate::sensitivity::{Scope, ScopeTable};
use crate::storage::CalculationRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// One shared camera table, keyed by device, game and skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunitySetting {
    pub device: String,
    pub game: Game,
    pub skill_level: Skill,
    pub sensitivity: ScopeTable,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl CommunitySetting {
    pub fn from_record(record: &CalculationRecord) -> Self {
        Self {
            device: record.device.model.clone(),
            game: record.game,
            skill_level: record.player_style.skill,
            sensitivity: record.camera_sensitivity,
            device_id: None,
            user_id: None,
        }
    }

    pub fn anonymized(mut self) -> Self {
        self.device_id = None;
        self.user_id = None;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommunitySummary {
    pub contributions: usize,
    pub unique_games: usize,
    pub unique_devices: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommunityDb {
    #[serde(default)]
    pub settings: Vec<CommunitySetting>,
}

impl CommunityDb {
    /// A missing file is an empty database; an unreadable one is logged and treated the same.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        match Self::read(path) {
            Ok(db) => db,
            Err(e) => {
                warn!("Failed to load community database {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> SenseResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> SenseResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn contribute(&mut self, setting: CommunitySetting, anonymous: bool) {
        let setting = if anonymous {
            setting.anonymized()
        } else {
            setting
        };
        self.settings.push(setting);
    }

    /// Mean camera value per scope over matching contributions, rounded to one decimal.
    pub fn recommendations(&self, device: &str, game: Game, skill: Skill) -> Option<ScopeTable> {
        let matches: Vec<&CommunitySetting> = self
            .settings
            .iter()
            .filter(|s| s.device == device && s.game == game && s.skill_level == skill)
            .collect();
        if matches.is_empty() {
            return None;
        }

        let n = matches.len() as f64;
        let mut sums = ScopeTable::filled(0.0);
        for s in &matches {
            for scope in Scope::all() {
                sums.set(scope, sums.get(scope) + s.sensitivity.get(scope));
            }
        }
        Some(sums.map(|_, v| round1(v / n)))
    }

    pub fn summary(&self) -> CommunitySummary {
        let games: HashSet<Game> = self.settings.iter().map(|s| s.game).collect();
        let devices: HashSet<&str> = self.settings.iter().map(|s| s.device.as_str()).collect();
        CommunitySummary {
            contributions: self.settings.len(),
            unique_games: games.len(),
            unique_devices: devices.len(),
        }
    }
}

/// Loads, appends and saves in one step.
pub fn share<P: AsRef<Path>>(path: P, setting: CommunitySetting, anonymous: bool) -> SenseResult<()> {
    let path = path.as_ref();
    let mut db = CommunityDb::load(path);
    db.contribute(setting, anonymous);
    db.save(path)?;
    info!("Settings shared with community ({} total)", db.settings.len());
    Ok(())
}
