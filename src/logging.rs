use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const CRATE_TARGETS: &[&str] = &["thoughtgrid"];

fn filter(verbosity: u8) -> EnvFilter {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let default_filter = CRATE_TARGETS
        .iter()
        .map(|t| format!("{t}={level}"))
        .collect::<Vec<_>>()
        .join(",");
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Logs to stderr. `RUST_LOG` overrides the `-v` level when set.
pub fn init_stderr(verbosity: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(filter(verbosity))
        .with_writer(std::io::stderr)
        .init();
}

/// Logs to `<dir>/thoughtgrid.log`, keeping the terminal free for the TUI.
pub fn init_file(verbosity: u8, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {:?}", dir))?;
    let path = dir.join("thoughtgrid.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {:?}", path))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter(verbosity))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
