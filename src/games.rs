use crate::error::{SenseError, SenseResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Game {
    #[strum(to_string = "Blood Strike", serialize = "blood_strike")]
    #[serde(rename = "Blood Strike")]
    BloodStrike,
    #[strum(to_string = "Free Fire", serialize = "free_fire")]
    #[serde(rename = "Free Fire")]
    FreeFire,
    #[strum(to_string = "Call of Duty Mobile", serialize = "codm", serialize = "call_of_duty_mobile")]
    #[serde(rename = "Call of Duty Mobile")]
    CallOfDutyMobile,
    #[strum(to_string = "Delta Force", serialize = "delta_force")]
    #[serde(rename = "Delta Force")]
    DeltaForce,
    #[strum(to_string = "PUBG Mobile", serialize = "pubg", serialize = "pubg_mobile")]
    #[serde(rename = "PUBG Mobile")]
    PubgMobile,
}

/// The per-game ceiling every computed sensitivity must respect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameProfile {
    pub name: String,
    pub sensitivity_cap: f64,
}

impl GameProfile {
    pub fn new(name: impl Into<String>, sensitivity_cap: f64) -> SenseResult<Self> {
        let name = name.into();
        if !sensitivity_cap.is_finite() || sensitivity_cap <= 0.0 {
            return Err(SenseError::InvalidGame(format!(
                "'{}' has a non-positive sensitivity cap ({})",
                name, sensitivity_cap
            )));
        }
        Ok(Self {
            name,
            sensitivity_cap,
        })
    }
}

impl Game {
    pub fn cap(&self) -> f64 {
        match self {
            Self::BloodStrike => 300.0,
            Self::FreeFire => 100.0,
            Self::CallOfDutyMobile => 300.0,
            Self::DeltaForce => 200.0,
            Self::PubgMobile => 300.0,
        }
    }

    pub fn modes(&self) -> &'static [&'static str] {
        match self {
            Self::BloodStrike => &["Battle Royale", "Team Deathmatch"],
            Self::FreeFire => &["Battle Royale", "Clash Squad"],
            Self::CallOfDutyMobile => &["Battle Royale", "Multiplayer"],
            Self::DeltaForce => &["Havoc Warfare", "Black Hawk Down"],
            Self::PubgMobile => &["Classic Royale", "Team Deathmatch"],
        }
    }

    /// Directory name under `<data_dir>/games/`.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::BloodStrike => "blood_strike",
            Self::FreeFire => "free_fire",
            Self::CallOfDutyMobile => "call_of_duty_mobile",
            Self::DeltaForce => "delta_force",
            Self::PubgMobile => "pubg_mobile",
        }
    }

    // Where the sensitivity sliders live in each game's own menus.
    pub fn settings_path(&self) -> &'static str {
        match self {
            Self::BloodStrike => "Settings > Sensitivity",
            Self::FreeFire => "Settings > Sensitivity",
            Self::CallOfDutyMobile => "Settings > Basic > Sensitivity",
            Self::DeltaForce => "Settings > Controls > Sensitivity",
            Self::PubgMobile => "Settings > Sensitivity > Camera / ADS / Gyroscope",
        }
    }

    pub fn profile(&self) -> GameProfile {
        GameProfile {
            name: self.to_string(),
            sensitivity_cap: self.cap(),
        }
    }

    /// Accepts a display name, a slug, or a 1-based menu index.
    pub fn parse(input: &str) -> SenseResult<Game> {
        let trimmed = input.trim();
        if let Ok(idx) = trimmed.parse::<usize>() {
            return idx
                .checked_sub(1)
                .and_then(|i| Game::iter().nth(i))
                .ok_or_else(|| SenseError::InvalidGame(format!("no game at menu index {}", idx)));
        }
        Game::from_str(trimmed).map_err(|_| SenseError::InvalidGame(trimmed.to_string()))
    }

    /// Resolves a mode name case-insensitively against this game's modes.
    pub fn resolve_mode(&self, mode: &str) -> Option<&'static str> {
        self.modes()
            .iter()
            .copied()
            .find(|m| m.eq_ignore_ascii_case(mode.trim()))
    }
}

pub fn all_games() -> Vec<Game> {
    Game::iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_slugs_and_indices() {
        assert_eq!(Game::parse("Free Fire").unwrap(), Game::FreeFire);
        assert_eq!(Game::parse("pubg").unwrap(), Game::PubgMobile);
        assert_eq!(Game::parse("delta force").unwrap(), Game::DeltaForce);
        assert_eq!(Game::parse("1").unwrap(), Game::BloodStrike);
        assert_eq!(Game::parse("5").unwrap(), Game::PubgMobile);
    }

    #[test]
    fn rejects_unknown_games() {
        assert!(Game::parse("Valorant").is_err());
        assert!(Game::parse("0").is_err());
        assert!(Game::parse("6").is_err());
        assert!(Game::parse(&usize::MAX.to_string()).is_err());
    }

    #[test]
    fn profile_rejects_bad_caps() {
        assert!(GameProfile::new("x", 0.0).is_err());
        assert!(GameProfile::new("x", -10.0).is_err());
        assert!(GameProfile::new("x", f64::NAN).is_err());
        assert_eq!(Game::FreeFire.profile().sensitivity_cap, 100.0);
    }
}
