use crate::error::SenseResult;
use crate::games::Game;
use crate::player::PlayerStyle;
use crate::sensitivity::{Scope, ScopeTable};
use crate::storage::{gyro_field, CalculationRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// One line of the statistics log: the full result of a calculation, minus the device details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsEntry {
    pub timestamp: String,
    pub game: Game,
    pub mode: Option<String>,
    pub device: String,
    pub player_style: PlayerStyle,
    pub camera_sensitivity: ScopeTable,
    pub firing_sensitivity: ScopeTable,
    #[serde(with = "gyro_field")]
    pub gyro_sensitivity: Option<ScopeTable>,
    pub feedback_applied: bool,
}

impl From<&CalculationRecord> for StatsEntry {
    fn from(record: &CalculationRecord) -> Self {
        Self {
            timestamp: record.timestamp.clone(),
            game: record.game,
            mode: record.mode.clone(),
            device: record.device.model.clone(),
            player_style: record.player_style,
            camera_sensitivity: record.camera_sensitivity,
            firing_sensitivity: record.firing_sensitivity,
            gyro_sensitivity: record.gyro_sensitivity,
            feedback_applied: record.feedback_applied,
        }
    }
}

/// Flat projection of a [`StatsEntry`] for spreadsheet export.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    timestamp: &'a str,
    game: Game,
    mode: Option<&'a str>,
    device: &'a str,
    camera_no_ads: f64,
    firing_no_ads: f64,
    gyro_available: bool,
    feedback_applied: bool,
}

impl<'a> From<&'a StatsEntry> for CsvRow<'a> {
    fn from(e: &'a StatsEntry) -> Self {
        Self {
            timestamp: &e.timestamp,
            game: e.game,
            mode: e.mode.as_deref(),
            device: &e.device,
            camera_no_ads: e.camera_sensitivity.get(Scope::NoAds),
            firing_no_ads: e.firing_sensitivity.get(Scope::NoAds),
            gyro_available: e.gyro_sensitivity.is_some(),
            feedback_applied: e.feedback_applied,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsSummary {
    pub total_calculations: usize,
    pub feedback_count: usize,
    pub per_game: BTreeMap<String, usize>,
    pub latest: Option<StatsEntry>,
}

/// Append-only JSON-lines log. Each calculation is one line, so a torn write only loses that line.
#[derive(Debug, Clone)]
pub struct StatsLog {
    path: PathBuf,
}

impl StatsLog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, entry: &StatsEntry) -> SenseResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", serde_json::to_string(entry)?)?;
        Ok(())
    }

    pub fn load(&self) -> SenseResult<Vec<StatsEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        let mut entries = Vec::new();
        for (lineno, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<StatsEntry>(line) {
                Ok(entry) => entries.push(entry),
                Err(e) => warn!(
                    "Skipping corrupt stats line {} in {}: {}",
                    lineno + 1,
                    self.path.display(),
                    e
                ),
            }
        }
        Ok(entries)
    }

    pub fn summary(&self) -> SenseResult<StatsSummary> {
        Ok(summarize(&self.load()?))
    }

    pub fn clear(&self) -> SenseResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            info!("Statistics cleared ({})", self.path.display());
        }
        Ok(())
    }

    /// Writes every entry to `dest` as CSV. Returns the number of rows written.
    pub fn export_csv<P: AsRef<Path>>(&self, dest: P) -> SenseResult<usize> {
        let entries = self.load()?;
        let mut wtr = csv::Writer::from_path(dest.as_ref())?;
        for e in &entries {
            wtr.serialize(CsvRow::from(e))?;
        }
        wtr.flush()?;
        Ok(entries.len())
    }
}

pub fn summarize(entries: &[StatsEntry]) -> StatsSummary {
    let mut per_game = BTreeMap::new();
    for e in entries {
        *per_game.entry(e.game.to_string()).or_insert(0) += 1;
    }
    StatsSummary {
        total_calculations: entries.len(),
        feedback_count: entries.iter().filter(|e| e.feedback_applied).count(),
        per_game,
        latest: entries.last().cloned(),
    }
}
