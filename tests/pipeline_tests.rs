use gamesense::device::DeviceProfile;
use gamesense::error::{SenseError, SenseResult};
use gamesense::feedback::{FeedbackStore, JsonFeedbackStore, NoFeedback};
use gamesense::games::{Game, GameProfile};
use gamesense::player::{AimingFinger, FingerCount, PlayerStyle, Skill};
use gamesense::prompt::Prompter;
use gamesense::sensitivity::{
    run_calculation, AcceptDefaults, AdjustmentFactor, Calculation, CalculationRequest,
    ConsoleInteraction, Degradation, Interaction, NewsItem, PreviewFactors, Rating, Scope,
    Sentiment, SensitivityTables, Stage,
};
use std::cell::Cell;
use std::fs;
use std::io::Cursor;

// --- FIXTURES ---

struct Fixture {
    device: DeviceProfile,
    style: PlayerStyle,
    game: GameProfile,
}

impl Fixture {
    fn reference(gyro: Option<f64>) -> Self {
        Self {
            device: DeviceProfile::new(440.0, 120.0, 6.67, gyro).unwrap(),
            style: PlayerStyle::new(
                FingerCount::Two,
                Skill::Intermediate,
                AimingFinger::Index,
                false,
            ),
            game: Game::CallOfDutyMobile.profile(),
        }
    }

    fn request(&self) -> CalculationRequest<'_> {
        CalculationRequest {
            device: &self.device,
            style: &self.style,
            game: &self.game,
        }
    }
}

struct FixedFeedback(AdjustmentFactor);

impl FeedbackStore for FixedFeedback {
    fn load(&self) -> SenseResult<Option<AdjustmentFactor>> {
        Ok(Some(self.0))
    }

    fn save(&self, _factor: &AdjustmentFactor) -> SenseResult<()> {
        Ok(())
    }
}

struct BrokenFeedback;

impl FeedbackStore for BrokenFeedback {
    fn load(&self) -> SenseResult<Option<AdjustmentFactor>> {
        Err(SenseError::InvalidInput("disk on fire".to_string()))
    }

    fn save(&self, _factor: &AdjustmentFactor) -> SenseResult<()> {
        Ok(())
    }
}

/// Answers with fixed inputs and records what it was shown.
struct Scripted {
    preview: PreviewFactors,
    rating: Rating,
    seen_camera_no_ads: Cell<Option<f64>>,
}

impl Scripted {
    fn new(preview: PreviewFactors, rating: Rating) -> Self {
        Self {
            preview,
            rating,
            seen_camera_no_ads: Cell::new(None),
        }
    }
}

impl Interaction for Scripted {
    fn preview(&mut self, tables: &SensitivityTables) -> SenseResult<PreviewFactors> {
        self.seen_camera_no_ads
            .set(Some(tables.camera.get(Scope::NoAds)));
        Ok(self.preview)
    }

    fn calibrate(&mut self, _tables: &SensitivityTables) -> SenseResult<Rating> {
        Ok(self.rating)
    }
}

struct Walkaway;

impl Interaction for Walkaway {
    fn preview(&mut self, _tables: &SensitivityTables) -> SenseResult<PreviewFactors> {
        Ok(PreviewFactors::default())
    }

    fn calibrate(&mut self, _tables: &SensitivityTables) -> SenseResult<Rating> {
        Err(SenseError::InvalidInput("player left".to_string()))
    }
}

fn news(sentiments: &[Sentiment]) -> Vec<NewsItem> {
    sentiments
        .iter()
        .map(|&s| NewsItem::new("post", s, "2025-05-25"))
        .collect()
}

// --- TESTS ---

#[test]
fn defaults_reproduce_base_and_report_degradations() {
    let fx = Fixture::reference(None);
    let outcome = run_calculation(fx.request(), &[], &NoFeedback, &mut AcceptDefaults).unwrap();

    assert_eq!(outcome.tables.camera.get(Scope::NoAds), 150.0);
    assert_eq!(outcome.tables.camera.get(Scope::X8), 75.0);
    assert_eq!(outcome.tables.firing.get(Scope::NoAds), 165.0);
    assert!(outcome.tables.gyro.is_none());
    assert!(outcome.feedback.is_none());
    assert!(outcome.warnings.contains(&Degradation::NoGyro));
    assert!(outcome.warnings.contains(&Degradation::NoNews));
}

#[test]
fn positive_news_nudges_every_table() {
    let fx = Fixture::reference(Some(3.0));
    let items = news(&[Sentiment::Positive, Sentiment::Positive]);
    let outcome = run_calculation(fx.request(), &items, &NoFeedback, &mut AcceptDefaults).unwrap();

    assert!((outcome.sentiment.cam_adjust - 1.05).abs() < 1e-12);
    assert_eq!(outcome.sentiment.cam_adjust, outcome.sentiment.gyro_adjust);
    assert_eq!(outcome.tables.camera.get(Scope::NoAds), 157.5);
    assert!(outcome.tables.gyro.is_some());
    assert!(!outcome.warnings.contains(&Degradation::NoNews));
}

#[test]
fn balanced_news_is_neutral() {
    let fx = Fixture::reference(None);
    let items = news(&[
        Sentiment::Positive,
        Sentiment::Negative,
        Sentiment::Neutral,
    ]);
    let outcome = run_calculation(fx.request(), &items, &NoFeedback, &mut AcceptDefaults).unwrap();
    assert_eq!(outcome.tables.camera.get(Scope::NoAds), 150.0);
}

#[test]
fn stored_feedback_applies_per_table() {
    let fx = Fixture::reference(None);
    let stored = FixedFeedback(AdjustmentFactor {
        cam_adjust: 0.9,
        fire_adjust: 1.1,
        gyro_adjust: 1.1,
    });
    let outcome = run_calculation(fx.request(), &[], &stored, &mut AcceptDefaults).unwrap();

    assert_eq!(outcome.tables.camera.get(Scope::NoAds), 135.0);
    assert_eq!(outcome.tables.firing.get(Scope::NoAds), 181.5);
    assert!(outcome.feedback.is_some());
}

#[test]
fn unreadable_feedback_degrades_to_neutral() {
    let fx = Fixture::reference(None);
    let outcome = run_calculation(fx.request(), &[], &BrokenFeedback, &mut AcceptDefaults).unwrap();

    assert_eq!(outcome.tables.camera.get(Scope::NoAds), 150.0);
    assert!(outcome.feedback.is_none());
    assert!(outcome
        .warnings
        .iter()
        .any(|w| matches!(w, Degradation::FeedbackUnavailable(_))));
}

#[test]
fn corrupt_feedback_file_degrades_to_neutral() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("feedback_log.json");
    fs::write(&path, "{ this is not json").unwrap();

    let fx = Fixture::reference(None);
    let store = JsonFeedbackStore::new(&path);
    let outcome = run_calculation(fx.request(), &[], &store, &mut AcceptDefaults).unwrap();
    assert_eq!(outcome.tables.firing.get(Scope::NoAds), 165.0);
    assert!(outcome.feedback.is_none());
}

#[test]
fn nonsensical_stored_factor_is_ignored() {
    let fx = Fixture::reference(None);
    let stored = FixedFeedback(AdjustmentFactor {
        cam_adjust: -1.0,
        fire_adjust: 1.0,
        gyro_adjust: 1.0,
    });
    let outcome = run_calculation(fx.request(), &[], &stored, &mut AcceptDefaults).unwrap();
    assert_eq!(outcome.tables.camera.get(Scope::NoAds), 150.0);
    assert!(outcome.feedback.is_none());
}

#[test]
fn preview_then_calibration_compound() {
    let fx = Fixture::reference(None);
    let preview = PreviewFactors::from_percentages([110, 100, 100, 100, 100, 100, 50]);
    let mut scripted = Scripted::new(preview, Rating::TooLow);

    let outcome = run_calculation(fx.request(), &[], &NoFeedback, &mut scripted).unwrap();

    // Preview sees the news/feedback-adjusted tables, not the final ones
    assert_eq!(scripted.seen_camera_no_ads.get(), Some(150.0));
    // 150 * 1.1 = 165, then * 1.1 = 181.5
    assert_eq!(outcome.tables.camera.get(Scope::NoAds), 181.5);
    assert_eq!(outcome.tables.camera.get(Scope::IronSight), 132.0);
    assert_eq!(outcome.calibration, Rating::TooLow);
}

#[test]
fn calibration_never_exceeds_cap() {
    let mut fx = Fixture::reference(Some(20.0));
    fx.game = Game::FreeFire.profile();
    let preview = PreviewFactors::from_percentages([300; 7]);
    let mut scripted = Scripted::new(preview, Rating::TooLow);

    let outcome = run_calculation(fx.request(), &[], &NoFeedback, &mut scripted).unwrap();
    assert!(outcome
        .tables
        .all_values()
        .all(|v| (0.0..=100.0).contains(&v)));
    assert_eq!(outcome.tables.camera.get(Scope::NoAds), 100.0);
}

#[test]
fn interaction_failure_aborts_everything() {
    let fx = Fixture::reference(None);
    let result = run_calculation(fx.request(), &[], &NoFeedback, &mut Walkaway);
    assert!(result.is_err());
}

#[test]
fn stages_only_move_forward() {
    let fx = Fixture::reference(None);

    let calc = Calculation::start(fx.request()).unwrap();
    assert_eq!(calc.stage(), Stage::Base);
    assert!(matches!(
        calc.clone().apply_preview(PreviewFactors::default()),
        Err(SenseError::Pipeline(_))
    ));
    assert!(calc.clone().finish().is_err());

    let calc = calc.apply_sentiment(&[]).unwrap();
    assert_eq!(calc.stage(), Stage::NewsAdjusted);
    assert!(calc.clone().apply_sentiment(&[]).is_err());
    assert!(calc.clone().apply_calibration(Rating::JustRight).is_err());

    // No stored feedback: the optional stage is skipped
    let calc = calc.apply_feedback(None).unwrap();
    assert_eq!(calc.stage(), Stage::NewsAdjusted);

    let calc = calc
        .apply_feedback(Some(AdjustmentFactor::neutral()))
        .unwrap();
    assert_eq!(calc.stage(), Stage::FeedbackAdjusted);
    assert!(calc.clone().apply_feedback(None).is_err());

    let calc = calc.apply_preview(PreviewFactors::default()).unwrap();
    assert_eq!(calc.stage(), Stage::Previewed);
    assert!(calc.clone().finish().is_err());

    let calc = calc.apply_calibration(Rating::JustRight).unwrap();
    assert_eq!(calc.stage(), Stage::Calibrated);
    let outcome = calc.finish().unwrap();
    assert_eq!(outcome.tables.camera.get(Scope::NoAds), 150.0);
}

#[test]
fn console_interaction_reads_percentages_and_rating() {
    let fx = Fixture::reference(Some(3.0));
    // 7 preview answers (two blanks keep 100), then "Too High"
    let input = "120\n\n90\n100\n100\n100\n\n1\n";
    let prompter = Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
    let mut console = ConsoleInteraction::new(prompter, "Call of Duty Mobile");

    let outcome = run_calculation(fx.request(), &[], &NoFeedback, &mut console).unwrap();
    // 150 * 1.2 = 180, then * 0.9 = 162
    assert_eq!(outcome.tables.camera.get(Scope::NoAds), 162.0);
    assert_eq!(outcome.calibration, Rating::TooHigh);

    let (_, out) = console.into_prompter().into_inner();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("For No ADS (Camera: 150, Fire: 165, Gyro:"));
    assert!(text.contains("SENSITIVITY CALIBRATION FOR CALL OF DUTY MOBILE"));
}

#[test]
fn calibration_rounds_exact_ties_to_even() {
    let fx = Fixture::reference(None);
    let mut scripted = Scripted::new(PreviewFactors::default(), Rating::TooHigh);
    let outcome = run_calculation(fx.request(), &[], &NoFeedback, &mut scripted).unwrap();
    // 82.5 * 0.9 = 74.25
    assert_eq!(outcome.tables.camera.get(Scope::X6), 74.2);
    assert_eq!(outcome.tables.camera.get(Scope::NoAds), 135.0);
}

#[test]
fn rating_choices_map_to_multipliers() {
    assert_eq!(Rating::from_choice(1).unwrap().multiplier(), 0.9);
    assert_eq!(Rating::from_choice(2).unwrap().multiplier(), 1.1);
    assert_eq!(Rating::from_choice(3).unwrap().multiplier(), 1.0);
    assert!(Rating::from_choice(4).is_err());
}

#[test]
fn skipped_gyro_rating_is_neutral() {
    let f = AdjustmentFactor::from_ratings(Rating::TooHigh, Rating::TooLow, None);
    assert_eq!(f.cam_adjust, 0.9);
    assert_eq!(f.fire_adjust, 1.1);
    assert_eq!(f.gyro_adjust, 1.0);
}
