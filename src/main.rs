mod cli;
mod commands;
mod logging;
mod storage;
mod ui;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let command = args.command.unwrap_or(cli::Command::Tui { month: None });
    if matches!(command, cli::Command::Tui { .. }) {
        logging::init_file(args.verbose, &storage::log_dir()?)?;
    } else {
        logging::init_stderr(args.verbose);
    }
    let location = storage::locate_settings(args.config.as_deref())?;
    match command {
        cli::Command::Tui { month } => commands::tui(month, location),
        cli::Command::Grid { month, today } => commands::grid(month, today, &location),
        cli::Command::Widths(widths) => commands::widths(widths, &location),
        cli::Command::Config { init } => commands::config(init, &location),
    }
}
