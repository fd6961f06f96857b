//! `stakeable`: token bookkeeping and staking over a JSON state file.

use anyhow::Context;
use clap::Parser;
use stakeable_cli::{execute, CliClock, CliConfig, Command};
use stakeable_utils::{init_logging, LogFormat};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stakeable", about = "Stakeable token with hourly staking rewards")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "STAKEABLE_CONFIG")]
    config: Option<PathBuf>,

    /// JSON file holding balances and stake records.
    #[arg(long, env = "STAKEABLE_STATE_FILE")]
    state_file: Option<PathBuf>,

    /// Pin the clock to this Unix time (seconds) instead of wall time.
    #[arg(long, env = "STAKEABLE_AT")]
    at: Option<u64>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "STAKEABLE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "STAKEABLE_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => CliConfig::from_toml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => CliConfig::default(),
    };
    if let Some(state_file) = cli.state_file {
        config.state_file = state_file;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }

    init_logging(config.log_format, &config.log_level);

    let clock = CliClock::from_arg(cli.at);
    execute(&config, clock, cli.command, &mut std::io::stdout().lock())
}
