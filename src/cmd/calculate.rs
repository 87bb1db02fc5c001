use super::probe::{self, DeviceArgs};
use super::{select_game, select_mode, Context};
use crate::reports;
use clap::Args;
use gamesense::community::{self, CommunitySetting};
use gamesense::device::DeviceInfo;
use gamesense::error::{SenseError, SenseResult};
use gamesense::feedback::JsonFeedbackStore;
use gamesense::news::{present_items, BuiltinNewsFeed, SentimentSource};
use gamesense::player::{AimingFinger, FingerCount, PlayerStyle, Skill};
use gamesense::prompt::Prompter;
use gamesense::sensitivity::{
    run_calculation, AcceptDefaults, CalculationRequest, ConsoleInteraction, Interaction,
};
use gamesense::session::{JsonSessionStore, SessionStore};
use gamesense::stats::StatsLog;
use gamesense::storage::{CalculationRecord, FileSink, PersistenceSink};
use std::io::{BufRead, Write};
use std::str::FromStr;
use std::thread;

#[derive(Args, Debug, Clone, Default)]
pub struct CalculateArgs {
    #[command(flatten)]
    pub device: DeviceArgs,

    /// Fingers used on screen (1, 2, 3+)
    #[arg(long)]
    pub fingers: Option<u8>,

    /// beginner, intermediate or advanced
    #[arg(long)]
    pub skill: Option<String>,

    /// thumb, index or other
    #[arg(long)]
    pub aiming: Option<String>,

    /// Claw grip (only meaningful with 3+ fingers)
    #[arg(long, default_value_t = false)]
    pub claw: bool,

    /// Skip the preview and calibration prompts and keep computed values
    #[arg(long, default_value_t = false)]
    pub accept_defaults: bool,

    /// Share the camera table with the community database
    #[arg(long, default_value_t = false)]
    pub share: bool,
}

impl CalculateArgs {
    fn has_style_flags(&self) -> bool {
        self.fingers.is_some() || self.skill.is_some() || self.aiming.is_some() || self.claw
    }
}

fn parse_flag<T: FromStr>(value: &Option<String>, what: &str) -> SenseResult<Option<T>> {
    value
        .as_deref()
        .map(|v| {
            T::from_str(v.trim())
                .map_err(|_| SenseError::InvalidInput(format!("unknown {} '{}'", what, v)))
        })
        .transpose()
}

fn ask_player_style<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> SenseResult<PlayerStyle> {
    writeln!(
        prompter.output(),
        "\n=== PLAYER STYLE ===\nHow many fingers do you play with?\n1. One\n2. Two\n3. Three or more"
    )?;
    let fingers = FingerCount::try_from(prompter.choice("Fingers", 3, 2)? as u8)?;

    writeln!(
        prompter.output(),
        "Skill level?\n1. Beginner\n2. Intermediate\n3. Advanced"
    )?;
    let skill = match prompter.choice("Skill", 3, 2)? {
        1 => Skill::Beginner,
        3 => Skill::Advanced,
        _ => Skill::Intermediate,
    };

    writeln!(
        prompter.output(),
        "Which finger do you aim with?\n1. Thumb\n2. Index\n3. Other"
    )?;
    let aiming = match prompter.choice("Aiming finger", 3, 1)? {
        2 => AimingFinger::Index,
        3 => AimingFinger::Other,
        _ => AimingFinger::Thumb,
    };

    let claw = if fingers == FingerCount::ThreeOrMore {
        prompter.confirm("Do you use claw grip?", false)?
    } else {
        false
    };
    Ok(PlayerStyle::new(fingers, skill, aiming, claw))
}

fn resolve_style<R: BufRead, W: Write>(
    args: &CalculateArgs,
    saved: Option<PlayerStyle>,
    prompter: &mut Prompter<R, W>,
) -> SenseResult<PlayerStyle> {
    if args.has_style_flags() {
        let base = saved.unwrap_or_default();
        let fingers = match args.fingers {
            Some(n) => FingerCount::try_from(n)?,
            None => base.finger_count,
        };
        let skill = parse_flag::<Skill>(&args.skill, "skill level")?.unwrap_or(base.skill);
        let aiming =
            parse_flag::<AimingFinger>(&args.aiming, "aiming finger")?.unwrap_or(base.aiming_finger);
        return Ok(PlayerStyle::new(fingers, skill, aiming, args.claw));
    }

    if let Some(style) = saved {
        let question = format!("Use saved player style ({})?", style.describe());
        if prompter.confirm(&question, true)? {
            return Ok(style);
        }
    }
    ask_player_style(prompter)
}

fn resolve_device_info<R: BufRead, W: Write>(
    args: &DeviceArgs,
    saved: Option<DeviceInfo>,
    prompter: &mut Prompter<R, W>,
) -> SenseResult<DeviceInfo> {
    if !args.is_complete() {
        if let Some(device) = saved {
            let question = format!("Use saved device ({})?", device.model);
            if prompter.confirm(&question, true)? {
                return Ok(device);
            }
        }
    }
    probe::resolve_device(args, prompter)
}

/// Full calculation: gather inputs, run the pipeline, persist the FINAL result.
pub fn run<R: BufRead, W: Write>(
    ctx: &Context,
    args: &CalculateArgs,
    prompter: &mut Prompter<R, W>,
) -> SenseResult<CalculationRecord> {
    let paths = &ctx.config.paths;
    let sessions = JsonSessionStore::new(paths.session_file());
    let mut session = sessions.load_or_default();

    let device = resolve_device_info(&args.device, session.device.clone(), prompter)?;
    reports::print_device_info(&device);
    let style = resolve_style(args, session.player_style, prompter)?;

    let game = select_game(ctx, prompter)?;
    let mode = select_mode(ctx, game, prompter)?;
    let profile = game.profile();

    // News, time-boxed
    let news_params = &ctx.config.news;
    let mode_label = mode
        .as_ref()
        .map(|m| format!(" ({})", m))
        .unwrap_or_default();
    println!(
        "\n📰 Fetching community posts for {}{} ({}s)...",
        game.to_string().to_uppercase(),
        mode_label,
        news_params.news_budget_secs
    );
    let feed = BuiltinNewsFeed::new(news_params.news_max_items);
    let pause = news_params.item_pause();
    let shown = present_items(
        feed.fetch(game, mode.as_deref()),
        news_params.budget(),
        |i, item| {
            println!(
                "  [{}] {}\n      Sentiment: {} | {}",
                i + 1,
                item.text,
                item.sentiment,
                item.timestamp
            );
            thread::sleep(pause);
        },
    );

    let request = CalculationRequest {
        device: &device.profile,
        style: &style,
        game: &profile,
    };
    let feedback = JsonFeedbackStore::new(paths.feedback_file());

    let outcome = if args.accept_defaults {
        run_calculation(request, &shown, &feedback, &mut AcceptDefaults)?
    } else {
        let mut console = ConsoleInteraction::new(prompter.by_ref(), game.to_string());
        let interaction: &mut dyn Interaction = &mut console;
        run_calculation(request, &shown, &feedback, interaction)?
    };

    for w in &outcome.warnings {
        println!("⚠️  {}", w);
    }
    reports::print_sensitivity(
        &format!("FINAL SENSITIVITY FOR {}{}", game.to_string().to_uppercase(), mode_label),
        &outcome.tables,
    );

    let record = CalculationRecord::new(device.clone(), style, game, mode, &outcome);
    let sink = FileSink::new(paths.games_dir(), StatsLog::new(paths.stats_file()));
    let saved = sink.persist(&record)?;
    println!(
        "\n✅ Saved to {} and {}",
        saved.report.display(),
        saved.record.display()
    );

    session.device = Some(device);
    session.player_style = Some(style);
    if let Err(e) = sessions.save(&session) {
        println!("⚠️  Could not remember this session: {}", e);
    }

    let share = args.share
        || (!args.accept_defaults
            && prompter.confirm("Share these settings with the community (anonymous)?", false)?);
    if share {
        community::share(
            paths.community_file(),
            CommunitySetting::from_record(&record),
            true,
        )?;
        println!("✅ Settings shared with the community.");
    }

    Ok(record)
}
