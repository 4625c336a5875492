//! sdnotifytest - scripted readiness notifications
//!
//! Sends a few "waiting" status updates, then readiness, a final status and
//! the stopping marker as one batch. Used to exercise a supervisor end to end.

use std::str::FromStr;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::{LevelFilter, info, warn};

use sdnotify::cli::Cli;
use sdnotify::config::Config;
use sdnotify::{Notifier, status, statusf};

fn setup_logging(cli_log_level: Option<&str>) -> Result<()> {
    let level = match cli_log_level {
        Some(s) => LevelFilter::from_str(s).unwrap_or_else(|_| {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
            LevelFilter::Info
        }),
        None => LevelFilter::Info,
    };

    env_logger::Builder::from_default_env().filter_level(level).try_init()?;
    Ok(())
}

fn send(notifier: &Notifier, quiet: bool, messages: &[String]) -> Result<()> {
    notifier.notify(messages).context("Failed to notify")?;
    if !quiet {
        println!("{} {}", "→".cyan(), messages.join(" | "));
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    let notifier = Notifier::from_config(&config).context("Failed to open notifier")?;
    info!(
        "sdnotifytest: notifying {}",
        notifier.address().map(|a| a.to_string()).unwrap_or_default()
    );

    for i in 0..cli.iterations {
        send(&notifier, cli.quiet, &[statusf!("waiting {}", i)])?;
    }

    send(
        &notifier,
        cli.quiet,
        &[
            status::READY.to_string(),
            status::status("done"),
            status::STOPPING.to_string(),
        ],
    )?;

    if let Err(e) = notifier.close() {
        warn!("sdnotifytest: {}", e);
    }

    Ok(())
}
