use gamesense::config::Config;
use gamesense::error::SenseResult;
use gamesense::games::{all_games, Game};
use gamesense::prompt::Prompter;
use std::io::{BufRead, Write};

pub mod benchmark;
pub mod calculate;
pub mod community;
pub mod feedback;
pub mod menu;
pub mod probe;
pub mod stats;
pub mod tutorial;
pub mod update;

/// Settings shared by every command for one run of the binary.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: Config,
    pub game: Option<Game>,
    pub mode: Option<String>,
}

pub fn select_game<R: BufRead, W: Write>(
    ctx: &Context,
    prompter: &mut Prompter<R, W>,
) -> SenseResult<Game> {
    if let Some(game) = ctx.game {
        return Ok(game);
    }
    let games = all_games();
    writeln!(prompter.output(), "\nSelect a game:")?;
    for (i, g) in games.iter().enumerate() {
        writeln!(prompter.output(), "{}. {}", i + 1, g)?;
    }
    let idx = prompter.choice("Game", games.len(), 1)?;
    Ok(games[idx - 1])
}

/// `None` means "all modes". An unknown `--mode` is reported and treated the same way.
pub fn select_mode<R: BufRead, W: Write>(
    ctx: &Context,
    game: Game,
    prompter: &mut Prompter<R, W>,
) -> SenseResult<Option<String>> {
    if let Some(requested) = &ctx.mode {
        return Ok(match game.resolve_mode(requested) {
            Some(m) => Some(m.to_string()),
            None => {
                println!(
                    "⚠️  '{}' is not a {} mode; using news from all modes.",
                    requested, game
                );
                None
            }
        });
    }
    if ctx.game.is_some() {
        return Ok(None);
    }
    let modes = game.modes();
    writeln!(prompter.output(), "\nSelect a mode for {}:", game)?;
    for (i, m) in modes.iter().enumerate() {
        writeln!(prompter.output(), "{}. {}", i + 1, m)?;
    }
    let idx = prompter.choice("Mode", modes.len(), 1)?;
    Ok(Some(modes[idx - 1].to_string()))
}
