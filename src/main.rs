use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use gamesense::config::Config;
use gamesense::games::Game;
use gamesense::prompt::Prompter;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::process;
use std::sync::Mutex;
use tracing::Level;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// JSON file with settings; explicit flags still win
    #[arg(global = true, long)]
    config: Option<PathBuf>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,

    /// Game name, slug, or menu number
    #[arg(global = true, short, long)]
    game: Option<String>,

    #[arg(global = true, short, long)]
    mode: Option<String>,

    #[command(flatten)]
    settings: Config,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Calculate sensitivity settings for a game
    Calculate(cmd::calculate::CalculateArgs),
    /// Rate the last settings to tune future calculations
    Feedback,
    /// Show, clear or export calculation statistics
    Stats(cmd::stats::StatsArgs),
    /// Measure frame rate and touch latency
    Benchmark(cmd::benchmark::BenchmarkArgs),
    /// Community-averaged settings
    Community(cmd::community::CommunityArgs),
    /// Check for a newer release
    Update,
    /// Walk through the main features
    Tutorial,
    /// Interactive main menu (default)
    Menu,
}

fn init_logging(config: &Config, debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::INFO };
    let log_path = config.paths.log_file();
    let file = fs::create_dir_all(&config.paths.data_dir).and_then(|_| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
    });

    match file {
        Ok(f) => tracing_subscriber::fmt()
            .with_max_level(level)
            .with_ansi(false)
            .with_target(false)
            .with_writer(Mutex::new(f))
            .init(),
        Err(e) => {
            eprintln!(
                "⚠️  Cannot open log file {} ({}). Logging to stderr.",
                log_path.display(),
                e
            );
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

fn main() {
    // Raw matches tell user-typed flags apart from defaults
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let config = match &cli.config {
        Some(path) => {
            let mut file_config = Config::load_from_file(path).unwrap_or_else(|e| {
                eprintln!("❌ {}", e);
                process::exit(1);
            });
            file_config.merge_from_cli(&cli.settings, &matches);
            file_config
        }
        None => cli.settings.clone(),
    };

    init_logging(&config, cli.debug);

    let game = match cli.game.as_deref().map(Game::parse).transpose() {
        Ok(g) => g,
        Err(e) => {
            eprintln!("❌ {}", e);
            process::exit(2);
        }
    };

    let ctx = cmd::Context {
        config,
        game,
        mode: cli.mode.clone(),
    };
    let mut prompter = Prompter::stdio();

    let result = match cli.command.unwrap_or(Commands::Menu) {
        Commands::Calculate(args) => cmd::calculate::run(&ctx, &args, &mut prompter).map(|_| ()),
        Commands::Feedback => cmd::feedback::run(&ctx, &mut prompter),
        Commands::Stats(args) => cmd::stats::run(&ctx, &args, &mut prompter),
        Commands::Benchmark(args) => cmd::benchmark::run(&ctx, &args),
        Commands::Community(args) => cmd::community::run(&ctx, &args),
        Commands::Update => cmd::update::run(&ctx),
        Commands::Tutorial => cmd::tutorial::run(&ctx, &mut prompter),
        Commands::Menu => cmd::menu::run(&ctx, &mut prompter),
    };

    if let Err(e) = result {
        println!("\n❌ {}", e);
        process::exit(1);
    }
}
