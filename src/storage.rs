use crate::device::DeviceInfo;
use crate::error::SenseResult;
use crate::games::Game;
use crate::player::PlayerStyle;
use crate::sensitivity::{CalculationOutcome, ScopeTable};
use crate::stats::{StatsEntry, StatsLog};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const NOT_AVAILABLE: &str = "Not Available";

/// `Option<ScopeTable>` on disk: a table, or the literal string "Not Available".
pub mod gyro_field {
    use super::NOT_AVAILABLE;
    use crate::sensitivity::ScopeTable;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<ScopeTable>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(table) => table.serialize(serializer),
            None => serializer.serialize_str(NOT_AVAILABLE),
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Table(ScopeTable),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<ScopeTable>, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Table(t) => Ok(Some(t)),
            Repr::Text(s) if s == NOT_AVAILABLE => Ok(None),
            Repr::Text(s) => Err(de::Error::custom(format!(
                "expected a gyro table or '{}', got '{}'",
                NOT_AVAILABLE, s
            ))),
        }
    }
}

/// The structured result of one FINAL calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord {
    pub device: DeviceInfo,
    pub player_style: PlayerStyle,
    pub game: Game,
    pub mode: Option<String>,
    pub camera_sensitivity: ScopeTable,
    pub firing_sensitivity: ScopeTable,
    #[serde(with = "gyro_field")]
    pub gyro_sensitivity: Option<ScopeTable>,
    pub feedback_applied: bool,
    pub timestamp: String,
}

impl CalculationRecord {
    pub fn new(
        device: DeviceInfo,
        player_style: PlayerStyle,
        game: Game,
        mode: Option<String>,
        outcome: &CalculationOutcome,
    ) -> Self {
        Self {
            device,
            player_style,
            game,
            mode,
            camera_sensitivity: outcome.tables.camera,
            firing_sensitivity: outcome.tables.firing,
            gyro_sensitivity: outcome.tables.gyro,
            feedback_applied: outcome.feedback.is_some(),
            timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    pub fn title(&self) -> String {
        match &self.mode {
            Some(mode) => format!("{} ({})", self.game.to_string().to_uppercase(), mode),
            None => self.game.to_string().to_uppercase(),
        }
    }
}

fn write_table(out: &mut String, title: &str, table: &ScopeTable) {
    let _ = writeln!(out, "\n=== {} ===", title);
    for (scope, value) in table.iter() {
        let _ = writeln!(out, "{}: {}", scope, value);
    }
}

/// Human-readable report written next to the JSON record.
pub fn render_report(record: &CalculationRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== {} SENSITIVITY SETTINGS ===", record.title());
    let _ = writeln!(out, "Generated on: {}\n", record.timestamp);

    let _ = writeln!(out, "Device Information:");
    for (k, v) in record.device.rows() {
        let _ = writeln!(out, "  {}: {}", k, v);
    }
    let _ = writeln!(out, "\nPlayer Style: {}", record.player_style.describe());

    write_table(&mut out, "Camera Sensitivity", &record.camera_sensitivity);
    write_table(&mut out, "Firing Sensitivity", &record.firing_sensitivity);
    match &record.gyro_sensitivity {
        Some(gyro) => write_table(&mut out, "Gyro Sensitivity", gyro),
        None => {
            let _ = writeln!(out, "\n=== Gyro Sensitivity ===\n{}", NOT_AVAILABLE);
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq)]
pub struct SavedPaths {
    pub report: PathBuf,
    pub record: PathBuf,
}

/// Receives FINAL results only.
pub trait PersistenceSink {
    fn persist(&self, record: &CalculationRecord) -> SenseResult<SavedPaths>;
}

/// Writes `games/<slug>/sensitivity_result.{txt,json}` and appends to the stats log.
pub struct FileSink {
    games_dir: PathBuf,
    stats: StatsLog,
}

impl FileSink {
    pub fn new<P: AsRef<Path>>(games_dir: P, stats: StatsLog) -> Self {
        Self {
            games_dir: games_dir.as_ref().to_path_buf(),
            stats,
        }
    }
}

impl PersistenceSink for FileSink {
    fn persist(&self, record: &CalculationRecord) -> SenseResult<SavedPaths> {
        let dir = self.games_dir.join(record.game.slug());
        fs::create_dir_all(&dir)?;

        let report = dir.join("sensitivity_result.txt");
        let json = dir.join("sensitivity_result.json");
        fs::write(&report, render_report(record))?;
        fs::write(&json, serde_json::to_string_pretty(record)?)?;

        self.stats.append(&StatsEntry::from(record))?;
        info!(
            "Results saved to {} and {}",
            report.display(),
            json.display()
        );
        Ok(SavedPaths {
            report,
            record: json,
        })
    }
}
