use crate::error::{SenseError, SenseResult};
use crate::games::Game;
use crate::updates::DEFAULT_RELEASE_URL;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub paths: DataPaths,
    #[command(flatten)]
    pub news: NewsParams,
    #[command(flatten)]
    pub updates: UpdateParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DataPaths {
    /// Directory holding feedback, session, stats and per-game results
    #[arg(long, global = true, default_value = "data")]
    pub data_dir: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
        }
    }
}

impl DataPaths {
    pub fn feedback_file(&self) -> PathBuf {
        self.data_dir.join("feedback_log.json")
    }

    pub fn session_file(&self) -> PathBuf {
        self.data_dir.join("session.json")
    }

    pub fn stats_file(&self) -> PathBuf {
        self.data_dir.join("stats.jsonl")
    }

    pub fn community_file(&self) -> PathBuf {
        self.data_dir.join("community_db.json")
    }

    pub fn benchmark_file(&self) -> PathBuf {
        self.data_dir.join("benchmark.json")
    }

    pub fn update_file(&self) -> PathBuf {
        self.data_dir.join("update_check.json")
    }

    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join("logs.txt")
    }

    pub fn games_dir(&self) -> PathBuf {
        self.data_dir.join("games")
    }

    pub fn game_dir(&self, game: Game) -> PathBuf {
        self.games_dir().join(game.slug())
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NewsParams {
    /// Total seconds spent presenting community posts
    #[arg(long, global = true, default_value_t = 15)]
    pub news_budget_secs: u64,
    /// Seconds each post stays on screen
    #[arg(long, global = true, default_value_t = 2)]
    pub news_item_secs: u64,
    #[arg(long, global = true, default_value_t = 7)]
    pub news_max_items: usize,
}

impl Default for NewsParams {
    fn default() -> Self {
        Self {
            news_budget_secs: 15,
            news_item_secs: 2,
            news_max_items: 7,
        }
    }
}

impl NewsParams {
    pub fn budget(&self) -> Duration {
        Duration::from_secs(self.news_budget_secs)
    }

    pub fn item_pause(&self) -> Duration {
        Duration::from_secs(self.news_item_secs)
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UpdateParams {
    #[arg(long, global = true, default_value = DEFAULT_RELEASE_URL)]
    pub release_url: String,
    #[arg(long, global = true, default_value = env!("CARGO_PKG_VERSION"))]
    pub current_version: String,
}

impl Default for UpdateParams {
    fn default() -> Self {
        Self {
            release_url: DEFAULT_RELEASE_URL.to_string(),
            current_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SenseResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SenseError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            SenseError::Config(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    /// Overlays only the values the user typed on the command line.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($group:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$group.$field = cli.$group.$field.clone();
                }
            };
        }

        update_if_present!(paths.data_dir);

        update_if_present!(news.news_budget_secs);
        update_if_present!(news.news_item_secs);
        update_if_present!(news.news_max_items);

        update_if_present!(updates.release_url);
        update_if_present!(updates.current_version);
    }
}
