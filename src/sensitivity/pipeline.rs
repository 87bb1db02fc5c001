use super::engine::{self, AdjustmentFactor};
use super::interactive::{Interaction, PreviewFactors, Rating};
use super::scope::SensitivityTables;
use super::sentiment::{sentiment_factor, NewsItem};
use crate::device::DeviceProfile;
use crate::error::{SenseError, SenseResult};
use crate::feedback::FeedbackStore;
use crate::games::GameProfile;
use crate::player::PlayerStyle;
use std::fmt;
use strum_macros::Display;
use tracing::{error, info, warn};

/// Progress of one calculation. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
pub enum Stage {
    Base,
    NewsAdjusted,
    FeedbackAdjusted,
    Previewed,
    Calibrated,
    Final,
}

/// A recoverable gap that let the calculation continue with a neutral or absent value.
#[derive(Debug, Clone, PartialEq)]
pub enum Degradation {
    NoGyro,
    NoNews,
    FeedbackUnavailable(String),
}

impl fmt::Display for Degradation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoGyro => write!(f, "Gyro sensitivity not available (no gyroscope range)"),
            Self::NoNews => write!(f, "No community news found; sentiment left neutral"),
            Self::FeedbackUnavailable(reason) => {
                write!(f, "Stored feedback ignored ({}); using neutral factor", reason)
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CalculationRequest<'a> {
    pub device: &'a DeviceProfile,
    pub style: &'a PlayerStyle,
    pub game: &'a GameProfile,
}

#[derive(Debug, Clone)]
pub struct Calculation {
    tables: SensitivityTables,
    cap: f64,
    stage: Stage,
    warnings: Vec<Degradation>,
    sentiment: AdjustmentFactor,
    feedback: Option<AdjustmentFactor>,
    preview: PreviewFactors,
    calibration: Rating,
}

/// The FINAL state: the only thing callers may display or persist.
#[derive(Debug, Clone)]
pub struct CalculationOutcome {
    pub tables: SensitivityTables,
    pub sentiment: AdjustmentFactor,
    pub feedback: Option<AdjustmentFactor>,
    pub preview: PreviewFactors,
    pub calibration: Rating,
    pub warnings: Vec<Degradation>,
}

impl Calculation {
    pub fn start(request: CalculationRequest<'_>) -> SenseResult<Self> {
        let tables = engine::compute_base(request.device, request.style, request.game)?;
        let mut warnings = Vec::new();
        if tables.gyro.is_none() {
            warnings.push(Degradation::NoGyro);
        }
        Ok(Self {
            tables,
            cap: request.game.sensitivity_cap,
            stage: Stage::Base,
            warnings,
            sentiment: AdjustmentFactor::neutral(),
            feedback: None,
            preview: PreviewFactors::default(),
            calibration: Rating::JustRight,
        })
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn tables(&self) -> &SensitivityTables {
        &self.tables
    }

    pub fn warnings(&self) -> &[Degradation] {
        &self.warnings
    }

    fn require(&self, allowed: &[Stage], action: &str) -> SenseResult<()> {
        if allowed.contains(&self.stage) {
            Ok(())
        } else {
            Err(SenseError::Pipeline(format!(
                "cannot {} from stage {}",
                action, self.stage
            )))
        }
    }

    pub fn apply_sentiment(mut self, items: &[NewsItem]) -> SenseResult<Self> {
        self.require(&[Stage::Base], "apply news sentiment")?;
        if items.is_empty() {
            self.warnings.push(Degradation::NoNews);
        }
        self.sentiment = sentiment_factor(items);
        self.tables = engine::apply_factor(&self.tables, &self.sentiment, self.cap);
        self.stage = Stage::NewsAdjusted;
        Ok(self)
    }

    /// `None` skips the stage; the calculation stays news-adjusted.
    pub fn apply_feedback(mut self, factor: Option<AdjustmentFactor>) -> SenseResult<Self> {
        self.require(&[Stage::NewsAdjusted], "apply stored feedback")?;
        if let Some(f) = factor {
            self.tables = engine::apply_factor(&self.tables, &f, self.cap);
            self.feedback = Some(f);
            self.stage = Stage::FeedbackAdjusted;
        }
        Ok(self)
    }

    pub fn apply_preview(mut self, preview: PreviewFactors) -> SenseResult<Self> {
        self.require(
            &[Stage::NewsAdjusted, Stage::FeedbackAdjusted],
            "apply preview",
        )?;
        self.tables = engine::apply_per_scope(&self.tables, preview.multipliers(), self.cap);
        self.preview = preview;
        self.stage = Stage::Previewed;
        Ok(self)
    }

    pub fn apply_calibration(mut self, rating: Rating) -> SenseResult<Self> {
        self.require(&[Stage::Previewed], "apply calibration")?;
        self.tables = engine::apply_uniform(&self.tables, rating.multiplier(), self.cap);
        self.calibration = rating;
        self.stage = Stage::Calibrated;
        Ok(self)
    }

    pub fn finish(mut self) -> SenseResult<CalculationOutcome> {
        self.require(&[Stage::Calibrated], "finish")?;
        self.stage = Stage::Final;
        Ok(CalculationOutcome {
            tables: self.tables,
            sentiment: self.sentiment,
            feedback: self.feedback,
            preview: self.preview,
            calibration: self.calibration,
            warnings: self.warnings,
        })
    }
}

/// Loads stored feedback. Read or validation failures degrade to "no feedback".
pub fn resolve_feedback(
    store: &dyn FeedbackStore,
) -> (Option<AdjustmentFactor>, Option<Degradation>) {
    match store.load().and_then(|f| {
        if let Some(ref factor) = f {
            factor.validate()?;
        }
        Ok(f)
    }) {
        Ok(f) => (f, None),
        Err(e) => {
            warn!("Failed to apply feedback: {}", e);
            (None, Some(Degradation::FeedbackUnavailable(e.to_string())))
        }
    }
}

fn run_stages(
    request: CalculationRequest<'_>,
    news: &[NewsItem],
    feedback: &dyn FeedbackStore,
    interaction: &mut dyn Interaction,
) -> SenseResult<CalculationOutcome> {
    let calc = Calculation::start(request)?.apply_sentiment(news)?;

    let (stored, degraded) = resolve_feedback(feedback);
    let mut calc = calc.apply_feedback(stored)?;
    if let Some(d) = degraded {
        calc.warnings.push(d);
    }

    let preview = interaction.preview(calc.tables())?;
    let calc = calc.apply_preview(preview)?;
    let rating = interaction.calibrate(calc.tables())?;
    calc.apply_calibration(rating)?.finish()
}

/// Runs BASE through FINAL. Any error aborts the whole calculation with no tables.
pub fn run_calculation(
    request: CalculationRequest<'_>,
    news: &[NewsItem],
    feedback: &dyn FeedbackStore,
    interaction: &mut dyn Interaction,
) -> SenseResult<CalculationOutcome> {
    let result = run_stages(request, news, feedback, interaction);

    match &result {
        Ok(outcome) => info!(
            "Sensitivity calculated for {} (sentiment {:.2}x, feedback {}, calibration {})",
            request.game.name,
            outcome.sentiment.cam_adjust,
            if outcome.feedback.is_some() { "applied" } else { "none" },
            outcome.calibration
        ),
        Err(e) => error!("Failed to calculate sensitivity: {}", e),
    }
    result
}
