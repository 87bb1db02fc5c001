use super::Context;
use crate::reports;
use clap::Args;
use gamesense::error::SenseResult;
use gamesense::prompt::Prompter;
use gamesense::stats::StatsLog;
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub struct StatsArgs {
    /// Delete all recorded statistics
    #[arg(long, default_value_t = false)]
    pub clear: bool,

    /// Write every recorded calculation to a CSV file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

pub fn run<R: BufRead, W: Write>(
    ctx: &Context,
    args: &StatsArgs,
    prompter: &mut Prompter<R, W>,
) -> SenseResult<()> {
    let log = StatsLog::new(ctx.config.paths.stats_file());

    if args.clear {
        return clear(&log, prompter, false);
    }

    let summary = log.summary()?;
    if summary.total_calculations == 0 {
        println!("\nNo statistics recorded yet. Run a calculation first.");
    } else {
        reports::print_stats(&summary);
    }

    if let Some(dest) = &args.export {
        let rows = log.export_csv(dest)?;
        println!("✅ Exported {} rows to {}", rows, dest.display());
    }
    Ok(())
}

/// `ask` adds a confirmation prompt (menu use); the `--clear` flag is already explicit.
pub fn clear<R: BufRead, W: Write>(
    log: &StatsLog,
    prompter: &mut Prompter<R, W>,
    ask: bool,
) -> SenseResult<()> {
    if ask && !prompter.confirm("Clear all statistics?", false)? {
        println!("Statistics kept.");
        return Ok(());
    }
    log.clear()?;
    println!("✅ Statistics cleared ({}).", log.path().display());
    Ok(())
}
