//! CLI configuration loaded from TOML.

use serde::{Deserialize, Serialize};
use stakeable_types::{AccountId, StakingParams, TokenAmount, WITHDRAW_DELAY_SECS};
use stakeable_utils::LogFormat;
use std::path::{Path, PathBuf};

use crate::CliError;

/// Settings for `stakeable`. Every field has a default so an empty file is valid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default = "default_token_name")]
    pub token_name: String,

    #[serde(default = "default_token_symbol")]
    pub token_symbol: String,

    /// Whole tokens minted to `owner` by `init`.
    #[serde(default = "default_initial_supply")]
    pub initial_supply: u64,

    #[serde(default = "default_owner")]
    pub owner: AccountId,

    /// Lock applied to queued withdrawals, in seconds.
    #[serde(default = "default_withdraw_delay_secs")]
    pub withdraw_delay_secs: u64,

    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_token_name() -> String {
    "MyCoolToken".to_string()
}

fn default_token_symbol() -> String {
    "MCT".to_string()
}

fn default_initial_supply() -> u64 {
    1_000
}

fn default_owner() -> AccountId {
    AccountId::new("owner")
}

fn default_withdraw_delay_secs() -> u64 {
    WITHDRAW_DELAY_SECS
}

fn default_state_file() -> PathBuf {
    PathBuf::from("./stakeable_state.json")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl CliConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, CliError> {
        toml::from_str(s).map_err(|e| CliError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String, CliError> {
        toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))
    }

    /// Initial supply in raw units.
    pub fn initial_supply_amount(&self) -> Result<TokenAmount, CliError> {
        TokenAmount::from_tokens(u128::from(self.initial_supply)).ok_or_else(|| {
            CliError::Config(format!("initial_supply {} overflows", self.initial_supply))
        })
    }

    pub fn staking_params(&self) -> StakingParams {
        StakingParams {
            withdraw_delay_secs: self.withdraw_delay_secs,
        }
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            token_name: default_token_name(),
            token_symbol: default_token_symbol(),
            initial_supply: default_initial_supply(),
            owner: default_owner(),
            withdraw_delay_secs: default_withdraw_delay_secs(),
            state_file: default_state_file(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = CliConfig::default();
        let toml_str = config.to_toml_string().expect("should serialize");
        let parsed = CliConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let config = CliConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.token_name, "MyCoolToken");
        assert_eq!(config.token_symbol, "MCT");
        assert_eq!(config.initial_supply, 1_000);
        assert_eq!(config.withdraw_delay_secs, 86_400);
        assert_eq!(config.log_format, LogFormat::Human);
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            owner = "alice"
            withdraw_delay_secs = 60
            log_format = "json"
        "#;
        let config = CliConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.owner, AccountId::new("alice"));
        assert_eq!(config.staking_params().withdraw_delay_secs, 60);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let err = CliConfig::from_toml_str(r#"log_format = "xml""#).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn missing_file_returns_config_error() {
        let err = CliConfig::from_toml_file(Path::new("/nonexistent/stakeable.toml")).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn initial_supply_is_scaled_to_raw_units() {
        let config = CliConfig {
            initial_supply: 5,
            ..CliConfig::default()
        };
        assert_eq!(
            config.initial_supply_amount().unwrap(),
            TokenAmount::from_tokens(5).unwrap()
        );
    }
}
