mod commands;
mod render;
mod storage;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::App;
use commands::add::AddArgs;
use commands::config::ConfigArgs;
use commands::edit::EditArgs;
use daybook_core::config::DaybookConfig;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "daybook")]
#[command(about = "Month, week, and day views over a local event store")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a month grid with event dots
    Month {
        /// Month to show (YYYY-MM). Defaults to the selected day's month
        #[arg(short, long)]
        month: Option<String>,

        /// Page this many months forward (negative for back)
        #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i32,

        /// Select a day and list its events under the grid
        #[arg(short, long)]
        select: Option<String>,
    },
    /// Show the week containing a day
    Week {
        /// Any day of the week (e.g. "2025-04-24", "next fri"). Defaults to today
        #[arg(short = 'D', long)]
        date: Option<String>,

        /// Page this many weeks forward (negative for back)
        #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i32,
    },
    /// Show one day's timeline
    Day {
        /// Day to show. Defaults to today
        #[arg(short = 'D', long)]
        date: Option<String>,

        /// Pack overlapping events into as few columns as possible
        #[arg(short, long)]
        packed: bool,
    },
    /// List one day's events, timed first
    Agenda {
        /// Day to list. Defaults to today
        #[arg(short = 'D', long)]
        date: Option<String>,
    },
    /// Create an event
    Add(AddArgs),
    /// Change an event
    Edit(EditArgs),
    /// Mark an event done, or not done
    Toggle {
        /// Day the event is on
        date: String,
        /// Position in the day's list (0-based) or id prefix
        target: String,
    },
    /// Delete an event
    Delete {
        /// Day the event is on
        date: String,
        /// Position in the day's list (0-based) or id prefix
        target: String,
    },
    /// Delete all events
    Clear {
        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Fill a month with random events
    Demo {
        /// Any day of the month to fill. Defaults to today
        #[arg(short = 'D', long)]
        date: Option<String>,

        /// Seed for reproducible events
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show settings, or change them with flags
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    let config = DaybookConfig::load()?;
    let mut app = App::load(config)?;

    match cli.command {
        Commands::Month { month, offset, select } => {
            commands::month::run(&mut app, month.as_deref(), offset, select.as_deref())
        }
        Commands::Week { date, offset } => commands::week::run(&mut app, date.as_deref(), offset),
        Commands::Day { date, packed } => commands::day::run(&mut app, date.as_deref(), packed),
        Commands::Agenda { date } => commands::agenda::run(&app, date.as_deref()),
        Commands::Add(args) => commands::add::run(&mut app, args).map(|_| ()),
        Commands::Edit(args) => commands::edit::run(&mut app, args).map(|_| ()),
        Commands::Toggle { date, target } => commands::toggle::run(&mut app, &date, &target).map(|_| ()),
        Commands::Delete { date, target } => commands::delete::run(&mut app, &date, &target).map(|_| ()),
        Commands::Clear { yes } => commands::clear::run(&mut app, yes).map(|_| ()),
        Commands::Demo { date, seed } => {
            commands::demo::run(&mut app, date.as_deref(), seed).map(|_| ())
        }
        Commands::Config(args) => commands::config::run(&app.config, args),
    }
}

/// Log to stderr, filtered by RUST_LOG (default: warnings only).
fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set up logging: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_add_with_times() {
        let cli = Cli::try_parse_from([
            "daybook", "add", "Standup", "--date", "2025-04-24", "--start", "9:00", "--duration", "15m",
        ])
        .unwrap();

        let Commands::Add(args) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(args.title.as_deref(), Some("Standup"));
        assert_eq!(args.duration.as_deref(), Some("15m"));
    }

    #[test]
    fn end_requires_start() {
        assert!(Cli::try_parse_from(["daybook", "add", "Trip", "--end", "10:00"]).is_err());
        assert!(
            Cli::try_parse_from(["daybook", "add", "X", "-s", "9:00", "-e", "10:00", "-d", "1h"]).is_err()
        );
    }

    #[test]
    fn parses_config_flags() {
        let cli = Cli::try_parse_from(["daybook", "config", "--strategy", "packed", "--preview-limit", "4"]).unwrap();

        let Commands::Config(args) = cli.command else {
            panic!("expected config");
        };
        assert_eq!(args.strategy.as_deref(), Some("packed"));
        assert_eq!(args.preview_limit, Some(4));
    }

    #[test]
    fn negative_offsets_parse() {
        let cli = Cli::try_parse_from(["daybook", "month", "--offset", "-2"]).unwrap();
        assert!(matches!(cli.command, Commands::Month { offset: -2, .. }));
    }
}
