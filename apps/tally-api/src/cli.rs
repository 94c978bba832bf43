use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_LOG_FILE: &str = "logs/tally-api.log";

#[derive(Parser, Debug)]
#[command(name = "tally-api")]
#[command(about = "Receipt loyalty-points HTTP service")]
#[command(version)]
pub struct Cli {
    /// Log per-rule scoring details
    #[arg(long)]
    pub debug: bool,

    /// Accept requests without an API key
    #[arg(long)]
    pub noauth: bool,

    /// Write logs to a file instead of stderr
    #[arg(long)]
    pub log: bool,

    /// Log file used with --log
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub logfile: PathBuf,

    /// Port to listen on (overrides TALLY_PORT)
    #[arg(long, short = 'p')]
    pub port: Option<u16>,
}
