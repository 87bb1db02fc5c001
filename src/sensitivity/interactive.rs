use super::scope::{Scope, SensitivityTables, SCOPE_COUNT};
use crate::error::{SenseError, SenseResult};
use crate::prompt::Prompter;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use strum_macros::{Display, EnumIter};

/// Per-scope multipliers chosen during preview. Each scope is scaled independently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewFactors {
    multipliers: [f64; SCOPE_COUNT],
}

impl Default for PreviewFactors {
    fn default() -> Self {
        Self {
            multipliers: [1.0; SCOPE_COUNT],
        }
    }
}

impl PreviewFactors {
    /// Percentages in canonical scope order; 100 keeps a scope unchanged.
    pub fn from_percentages(percentages: [i64; SCOPE_COUNT]) -> Self {
        let mut multipliers = [1.0; SCOPE_COUNT];
        for (m, p) in multipliers.iter_mut().zip(percentages) {
            *m = p as f64 / 100.0;
        }
        Self { multipliers }
    }

    pub fn set_percentage(&mut self, scope: Scope, percentage: i64) {
        self.multipliers[scope.index()] = percentage as f64 / 100.0;
    }

    pub fn multiplier(&self, scope: Scope) -> f64 {
        self.multipliers[scope.index()]
    }

    pub fn multipliers(&self) -> &[f64; SCOPE_COUNT] {
        &self.multipliers
    }
}

/// A player's verdict after testing a setting in-game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, Serialize, Deserialize)]
pub enum Rating {
    #[strum(serialize = "Too High")]
    TooHigh,
    #[strum(serialize = "Too Low")]
    TooLow,
    #[strum(serialize = "Just Right")]
    JustRight,
}

impl Rating {
    pub fn multiplier(self) -> f64 {
        match self {
            Self::TooHigh => 0.9,
            Self::TooLow => 1.1,
            Self::JustRight => 1.0,
        }
    }

    /// Menu numbering: 1 too high, 2 too low, 3 just right.
    pub fn from_choice(choice: usize) -> SenseResult<Self> {
        match choice {
            1 => Ok(Self::TooHigh),
            2 => Ok(Self::TooLow),
            3 => Ok(Self::JustRight),
            n => Err(SenseError::InvalidInput(format!(
                "rating must be 1, 2 or 3, got {}",
                n
            ))),
        }
    }
}

/// Acquires the user-driven adjustment inputs. The pipeline applies them; implementations
/// only ask.
pub trait Interaction {
    fn preview(&mut self, tables: &SensitivityTables) -> SenseResult<PreviewFactors>;
    fn calibrate(&mut self, tables: &SensitivityTables) -> SenseResult<Rating>;
}

/// Keeps every value as computed.
pub struct AcceptDefaults;

impl Interaction for AcceptDefaults {
    fn preview(&mut self, _tables: &SensitivityTables) -> SenseResult<PreviewFactors> {
        Ok(PreviewFactors::default())
    }

    fn calibrate(&mut self, _tables: &SensitivityTables) -> SenseResult<Rating> {
        Ok(Rating::JustRight)
    }
}

pub struct ConsoleInteraction<R, W> {
    prompter: Prompter<R, W>,
    game: String,
}

impl<R: BufRead, W: Write> ConsoleInteraction<R, W> {
    pub fn new(prompter: Prompter<R, W>, game: impl Into<String>) -> Self {
        Self {
            prompter,
            game: game.into(),
        }
    }

    pub fn into_prompter(self) -> Prompter<R, W> {
        self.prompter
    }
}

impl<R: BufRead, W: Write> Interaction for ConsoleInteraction<R, W> {
    fn preview(&mut self, tables: &SensitivityTables) -> SenseResult<PreviewFactors> {
        writeln!(
            self.prompter.output(),
            "\n=== SENSITIVITY PREVIEW FOR {} ===\n\
             Enter a percentage to adjust (110 = +10%, 90 = -10%) or 100 to keep as is.",
            self.game.to_uppercase()
        )?;

        let mut factors = PreviewFactors::default();
        for (scope, cam) in tables.camera.iter() {
            let gyro = tables
                .gyro
                .map(|g| format!(", Gyro: {}", g.get(scope)))
                .unwrap_or_default();
            let question = format!(
                "For {} (Camera: {}, Fire: {}{})",
                scope,
                cam,
                tables.firing.get(scope),
                gyro
            );
            let pct = self.prompter.integer(&question, 100)?;
            factors.set_percentage(scope, pct);
        }
        Ok(factors)
    }

    fn calibrate(&mut self, _tables: &SensitivityTables) -> SenseResult<Rating> {
        writeln!(
            self.prompter.output(),
            "\n=== SENSITIVITY CALIBRATION FOR {} ===\n\
             After testing in {}, do you find the sensitivity:\n\
             1. Too High\n2. Too Low\n3. Just Right",
            self.game.to_uppercase(),
            self.game
        )?;
        let choice = self.prompter.choice("Select", 3, 3)?;
        Rating::from_choice(choice)
    }
}
