use crate::error::SenseError;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum FingerCount {
    One,
    Two,
    ThreeOrMore,
}

impl TryFrom<u8> for FingerCount {
    type Error = SenseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            n if n >= 3 => Ok(Self::ThreeOrMore),
            n => Err(SenseError::InvalidInput(format!(
                "finger count must be at least 1, got {}",
                n
            ))),
        }
    }
}

impl From<FingerCount> for u8 {
    fn from(value: FingerCount) -> Self {
        match value {
            FingerCount::One => 1,
            FingerCount::Two => 2,
            FingerCount::ThreeOrMore => 3,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Skill {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum AimingFinger {
    Thumb,
    Index,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerStyle {
    #[serde(rename = "fingers")]
    pub finger_count: FingerCount,
    pub skill: Skill,
    pub aiming_finger: AimingFinger,
    pub claw_grip: bool,
}

impl PlayerStyle {
    /// Claw grip only applies to three-or-more finger setups and is dropped otherwise.
    pub fn new(
        finger_count: FingerCount,
        skill: Skill,
        aiming_finger: AimingFinger,
        claw_grip: bool,
    ) -> Self {
        Self {
            finger_count,
            skill,
            aiming_finger,
            claw_grip: claw_grip && finger_count == FingerCount::ThreeOrMore,
        }
    }

    pub fn finger_factor(&self) -> f64 {
        match (self.finger_count, self.claw_grip) {
            (FingerCount::One, _) => 1.1,
            (FingerCount::Two, _) => 1.0,
            (FingerCount::ThreeOrMore, true) => 0.9,
            (FingerCount::ThreeOrMore, false) => 0.85,
        }
    }

    pub fn aiming_factor(&self) -> f64 {
        match self.aiming_finger {
            AimingFinger::Thumb => 1.1,
            AimingFinger::Index => 1.0,
            AimingFinger::Other => 0.95,
        }
    }

    pub fn skill_factor(&self) -> f64 {
        match self.skill {
            Skill::Beginner => 0.9,
            Skill::Intermediate => 1.0,
            Skill::Advanced => 1.15,
        }
    }

    pub fn style_scale(&self) -> f64 {
        self.finger_factor() * self.aiming_factor() * self.skill_factor()
    }

    pub fn describe(&self) -> String {
        format!(
            "{} fingers, {} skill, aiming with {}, {} grip",
            u8::from(self.finger_count),
            self.skill,
            self.aiming_finger,
            if self.claw_grip { "claw" } else { "no claw" }
        )
    }
}

impl Default for PlayerStyle {
    fn default() -> Self {
        Self::new(
            FingerCount::Two,
            Skill::Intermediate,
            AimingFinger::Thumb,
            false,
        )
    }
}
