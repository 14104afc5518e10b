use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "gymstreak", version, about = "Gym attendance streak tracker")]
struct Cli {
    /// Log engine and storage activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a gym visit
    Checkin(commands::checkin::CheckinArgs),
    /// Current streak statistics
    Stats(commands::stats::StatsArgs),
    /// Recent closed streaks
    History(commands::stats::HistoryArgs),
    /// Streak protectors
    Protector {
        #[command(subcommand)]
        action: commands::protector::ProtectorAction,
    },
    /// Rest weekdays
    RestDays {
        #[command(subcommand)]
        action: commands::rest_days::RestDaysAction,
    },
    /// Points balance
    Points {
        #[command(subcommand)]
        action: commands::points::PointsAction,
    },
    /// Gym locations
    Location {
        #[command(subcommand)]
        action: commands::location::LocationAction,
    },
    /// Attendance, protector and rest marks for a month
    Calendar(commands::calendar::CalendarArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Delete all tracker data
    Reset(commands::reset::ResetArgs),
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Checkin(args) => commands::checkin::run(args),
        Commands::Stats(args) => commands::stats::run(args),
        Commands::History(args) => commands::stats::history(args),
        Commands::Protector { action } => commands::protector::run(action),
        Commands::RestDays { action } => commands::rest_days::run(action),
        Commands::Points { action } => commands::points::run(action),
        Commands::Location { action } => commands::location::run(action),
        Commands::Calendar(args) => commands::calendar::run(args),
        Commands::Config { action } => commands::config::run(action),
        Commands::Reset(args) => commands::reset::run(args),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
