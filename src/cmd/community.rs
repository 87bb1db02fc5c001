use super::Context;
use crate::reports;
use clap::Args;
use gamesense::community::CommunityDb;
use gamesense::error::{SenseError, SenseResult};
use gamesense::player::Skill;
use std::str::FromStr;

#[derive(Args, Debug, Clone, Default)]
pub struct CommunityArgs {
    /// Device model to look up recommendations for (needs --game and --skill)
    #[arg(long)]
    pub device: Option<String>,

    #[arg(long)]
    pub skill: Option<String>,
}

pub fn run(ctx: &Context, args: &CommunityArgs) -> SenseResult<()> {
    let db = CommunityDb::load(ctx.config.paths.community_file());
    reports::print_community_summary(&db.summary());

    let (device, game) = match (&args.device, ctx.game) {
        (Some(d), Some(g)) => (d, g),
        _ => return Ok(()),
    };
    let skill = match &args.skill {
        Some(s) => Skill::from_str(s.trim())
            .map_err(|_| SenseError::InvalidInput(format!("unknown skill level '{}'", s)))?,
        None => Skill::Intermediate,
    };

    match db.recommendations(device, game, skill) {
        Some(table) => reports::print_scope_table(
            &format!("Community camera settings: {} / {} / {}", device, game, skill),
            &table,
        ),
        None => println!(
            "\nNo community data for {} on {} at {} level yet.",
            device, game, skill
        ),
    }
    Ok(())
}
