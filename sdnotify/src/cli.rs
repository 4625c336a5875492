//! CLI argument parsing for sdnotifytest

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sdnotifytest")]
#[command(
    author,
    version,
    about = "Send a scripted sequence of readiness notifications to NOTIFY_SOCKET",
    long_about = None
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of "waiting" status updates sent before readiness
    #[arg(short = 'n', long, default_value = "3")]
    pub iterations: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Do not echo notifications to stdout
    #[arg(short, long)]
    pub quiet: bool,
}
