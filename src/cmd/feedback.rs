use super::{select_game, Context};
use gamesense::error::SenseResult;
use gamesense::feedback::{FeedbackStore, JsonFeedbackStore};
use gamesense::prompt::Prompter;
use gamesense::sensitivity::{AdjustmentFactor, Rating};
use std::io::{BufRead, Write};

const RATING_MENU: &str = "1. Too High\n2. Too Low\n3. Just Right";

fn ask_rating<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    heading: &str,
) -> SenseResult<Rating> {
    writeln!(prompter.output(), "\n{}:\n{}", heading, RATING_MENU)?;
    Rating::from_choice(prompter.choice("Select", 3, 3)?)
}

/// Rates camera, firing and gyro after in-game testing; the result scales every future calculation.
pub fn run<R: BufRead, W: Write>(ctx: &Context, prompter: &mut Prompter<R, W>) -> SenseResult<()> {
    let game = select_game(ctx, prompter)?;
    let mode = ctx
        .mode
        .as_deref()
        .map(|m| format!(" ({})", m))
        .unwrap_or_default();
    println!(
        "\n=== FEEDBACK COLLECTION FOR {}{} ===\nTest your settings in {}'s training mode first.",
        game.to_string().to_uppercase(),
        mode,
        game
    );

    let camera = ask_rating(prompter, "Camera sensitivity")?;
    let firing = ask_rating(prompter, "Firing sensitivity")?;

    writeln!(
        prompter.output(),
        "\nGyro sensitivity (skip if not applicable):\n{}\n4. Skip",
        RATING_MENU
    )?;
    let gyro = match prompter.choice("Select", 4, 4)? {
        4 => None,
        n => Some(Rating::from_choice(n)?),
    };

    let factor = AdjustmentFactor::from_ratings(camera, firing, gyro);
    let store = JsonFeedbackStore::new(ctx.config.paths.feedback_file());
    store.save(&factor)?;

    println!(
        "✅ Feedback saved to {}: camera {:.1}x, firing {:.1}x, gyro {:.1}x",
        store.path().display(),
        factor.cam_adjust,
        factor.fire_adjust,
        factor.gyro_adjust
    );
    Ok(())
}
