use crate::error::SenseResult;
use crate::sensitivity::{AdjustmentFactor, Rating};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Multipliers remembered from the player's last feedback session.
pub trait FeedbackStore {
    /// `Ok(None)` when no feedback has been recorded yet.
    fn load(&self) -> SenseResult<Option<AdjustmentFactor>>;
    fn save(&self, factor: &AdjustmentFactor) -> SenseResult<()>;
}

pub struct JsonFeedbackStore {
    path: PathBuf,
}

impl JsonFeedbackStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FeedbackStore for JsonFeedbackStore {
    fn load(&self) -> SenseResult<Option<AdjustmentFactor>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save(&self, factor: &AdjustmentFactor) -> SenseResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(factor)?)?;
        info!("Feedback saved to {}", self.path.display());
        Ok(())
    }
}

/// Always empty. Used when a calculation should ignore past feedback.
pub struct NoFeedback;

impl FeedbackStore for NoFeedback {
    fn load(&self) -> SenseResult<Option<AdjustmentFactor>> {
        Ok(None)
    }

    fn save(&self, _factor: &AdjustmentFactor) -> SenseResult<()> {
        Ok(())
    }
}

impl AdjustmentFactor {
    /// A skipped gyro rating leaves gyro untouched.
    pub fn from_ratings(camera: Rating, firing: Rating, gyro: Option<Rating>) -> Self {
        Self {
            cam_adjust: camera.multiplier(),
            fire_adjust: firing.multiplier(),
            gyro_adjust: gyro.map(Rating::multiplier).unwrap_or(1.0),
        }
    }
}
