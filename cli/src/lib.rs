//! Support code for the `stakeable` binary: configuration, the pinned clock,
//! the on-disk state file and the subcommands that run against it.

pub mod clock;
pub mod commands;
pub mod config;
pub mod error;
pub mod state;

pub use clock::CliClock;
pub use commands::{execute, init, Command};
pub use config::CliConfig;
pub use error::CliError;
pub use state::StateFile;
