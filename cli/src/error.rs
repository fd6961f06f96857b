use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(String),

    #[error("state file {0} does not exist (run `stakeable init` first)")]
    NotInitialized(PathBuf),

    #[error("state file {0} already exists")]
    AlreadyInitialized(PathBuf),

    #[error("invalid state file: {0}")]
    State(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
