use clap::{Parser, Subcommand};
use dream_garage_core::Config;

mod commands;

#[derive(Parser)]
#[command(name = "dream-garage", version, about = "Dream Garage CLI")]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse cars and garage environments
    Catalog {
        #[command(subcommand)]
        action: commands::catalog::CatalogAction,
    },
    /// Team standings
    Leaderboard {
        /// Only show the first N places
        #[arg(long)]
        top: Option<usize>,
    },
    /// Badge progress for the active account
    Achievements,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Interactive session reading one command per line from stdin
    Session,
}

fn init_logging(verbose: bool, config: &Config) {
    let level = if verbose { "debug" } else { config.logging.level.as_str() };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();

    // A broken config file must still be fixable via `config set/reset`.
    let (config, config_err) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    init_logging(cli.verbose, &config);

    let result = match (cli.command, config_err) {
        (Commands::Config { action }, _) => commands::config::run(action),
        (_, Some(e)) => Err(e.into()),
        (Commands::Catalog { action }, None) => commands::catalog::run(action, &config),
        (Commands::Leaderboard { top }, None) => commands::leaderboard::run(top, &config),
        (Commands::Achievements, None) => commands::achievements::run(&config),
        (Commands::Session, None) => commands::session::run(&config),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
