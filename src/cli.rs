use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "thoughtgrid",
    version,
    about = "Terminal thought calendar with week-column month grids"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Launch the interactive TUI
    Tui {
        /// Month to open on, in YYYY-MM format
        #[arg(long)]
        month: Option<String>,
    },
    /// Print the grid for a month
    Grid {
        /// Month in YYYY-MM format (defaults to the current month)
        #[arg(long)]
        month: Option<String>,
        /// Date treated as today, in YYYY-MM-DD format
        #[arg(long)]
        today: Option<String>,
    },
    /// Print width hints for a week count or a month
    Widths(WidthsArgs),
    /// Show the settings file, optionally writing defaults
    Config {
        /// Write default settings if no file exists yet
        #[arg(long)]
        init: bool,
    },
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct WidthsArgs {
    /// Number of week columns
    #[arg(long)]
    pub weeks: Option<usize>,
    /// Month in YYYY-MM format
    #[arg(long)]
    pub month: Option<String>,
}
