use super::Context;
use gamesense::error::SenseResult;
use gamesense::games::all_games;
use gamesense::prompt::Prompter;
use std::io::{BufRead, Write};

const STEPS: [(&str, &str); 7] = [
    (
        "Welcome",
        "Welcome to GameSense! This tutorial walks through the main features.",
    ),
    (
        "Device Information",
        "First we gather your device's DPI, refresh rate, screen size and gyroscope range. \
         They drive the base sensitivity.",
    ),
    (
        "Game Selection",
        "Next, pick your game and mode. Each game has its own sensitivity ceiling.",
    ),
    (
        "Player Style",
        "Tell us how many fingers you use, your skill level and which finger aims.",
    ),
    (
        "Sensitivity Calculation",
        "We compute camera, firing and gyro values for every scope, nudge them by community \
         sentiment and your past feedback, then let you preview and calibrate.",
    ),
    ("Applying Settings", ""),
    (
        "Fine-tuning",
        "After testing, pick 'Provide Feedback' from the main menu and rate camera, firing and \
         gyro. Future calculations use your ratings.",
    ),
];

fn application_guide(ctx: &Context) -> String {
    let games = match ctx.game {
        Some(g) => vec![g],
        None => all_games(),
    };
    let mut guide = String::from("Copy the calculated values into each game's menu:\n");
    for g in games {
        guide.push_str(&format!("  - {}: {}\n", g, g.settings_path()));
    }
    guide
}

pub fn run<R: BufRead, W: Write>(ctx: &Context, prompter: &mut Prompter<R, W>) -> SenseResult<()> {
    println!("\n=== TUTORIAL MODE ===");
    for (i, (title, content)) in STEPS.iter().enumerate() {
        let body = if content.is_empty() {
            application_guide(ctx)
        } else {
            content.to_string()
        };
        println!("\n[{}/{}] === {} ===\n{}", i + 1, STEPS.len(), title.to_uppercase(), body);
        if i + 1 < STEPS.len() && !prompter.confirm("Continue to next step?", true)? {
            println!("Tutorial stopped.");
            return Ok(());
        }
    }
    println!("\n✅ Tutorial completed!");
    Ok(())
}
