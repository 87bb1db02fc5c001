use super::benchmark::BenchmarkArgs;
use super::calculate::CalculateArgs;
use super::community::CommunityArgs;
use super::stats::StatsArgs;
use super::{benchmark, calculate, community, feedback, stats, tutorial, update, Context};
use gamesense::error::SenseResult;
use gamesense::prompt::Prompter;
use gamesense::stats::StatsLog;
use std::io::{BufRead, Write};
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumCount)]
enum MenuItem {
    #[strum(serialize = "Calculate Sensitivity")]
    Calculate,
    #[strum(serialize = "Provide Feedback")]
    Feedback,
    #[strum(serialize = "View Statistics")]
    ViewStats,
    #[strum(serialize = "Clear Statistics")]
    ClearStats,
    #[strum(serialize = "Run Device Benchmark")]
    Benchmark,
    #[strum(serialize = "Community Settings")]
    Community,
    #[strum(serialize = "Check for Updates")]
    Update,
    #[strum(serialize = "Tutorial")]
    Tutorial,
    #[strum(serialize = "Exit")]
    Exit,
}

fn dispatch<R: BufRead, W: Write>(
    item: MenuItem,
    ctx: &Context,
    prompter: &mut Prompter<R, W>,
) -> SenseResult<()> {
    match item {
        MenuItem::Calculate => calculate::run(ctx, &CalculateArgs::default(), prompter).map(|_| ()),
        MenuItem::Feedback => feedback::run(ctx, prompter),
        MenuItem::ViewStats => stats::run(ctx, &StatsArgs::default(), prompter),
        MenuItem::ClearStats => {
            let log = StatsLog::new(ctx.config.paths.stats_file());
            stats::clear(&log, prompter, true)
        }
        MenuItem::Benchmark => benchmark::run(ctx, &BenchmarkArgs::default()),
        MenuItem::Community => community::run(ctx, &CommunityArgs::default()),
        MenuItem::Update => update::run(ctx),
        MenuItem::Tutorial => tutorial::run(ctx, prompter),
        MenuItem::Exit => Ok(()),
    }
}

/// Loops until Exit (or end of input). A failed action is reported and the menu comes back.
pub fn run<R: BufRead, W: Write>(ctx: &Context, prompter: &mut Prompter<R, W>) -> SenseResult<()> {
    let items: Vec<MenuItem> = MenuItem::iter().collect();
    loop {
        writeln!(prompter.output(), "\n=== GAMESENSE MAIN MENU ===")?;
        for (i, item) in items.iter().enumerate() {
            writeln!(prompter.output(), "{}. {}", i + 1, item)?;
        }
        let choice = prompter.choice("Select", MenuItem::COUNT, MenuItem::COUNT)?;
        let item = items[choice - 1];
        if item == MenuItem::Exit {
            println!("Goodbye!");
            return Ok(());
        }
        if let Err(e) = dispatch(item, ctx, prompter) {
            println!("\n❌ {}", e);
        }
    }
}
