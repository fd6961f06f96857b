//! JSON state file holding the token ledger and the staking engine snapshot.

use serde::{Deserialize, Serialize};
use stakeable_ledger::TokenLedger;
use stakeable_stake::{EngineSnapshot, StakeEngine};
use stakeable_types::Clock;
use std::path::Path;

use crate::CliError;

/// Everything `stakeable` persists between invocations.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateFile {
    pub ledger: TokenLedger,
    #[serde(default)]
    pub engine: EngineSnapshot,
}

impl StateFile {
    pub fn new(ledger: TokenLedger, engine: EngineSnapshot) -> Self {
        Self { ledger, engine }
    }

    /// Read a state file written by [`StateFile::save`].
    pub fn load(path: &Path) -> Result<Self, CliError> {
        if !path.exists() {
            return Err(CliError::NotInitialized(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the state as pretty JSON, replacing the file atomically.
    pub fn save(&self, path: &Path) -> Result<(), CliError> {
        let json = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, path)?;
        tracing::debug!(path = %path.display(), "state saved");
        Ok(())
    }

    pub fn into_engine<C: Clock>(self, clock: C) -> StakeEngine<TokenLedger, C> {
        StakeEngine::from_snapshot(self.ledger, clock, self.engine)
    }

    pub fn from_engine<C: Clock>(engine: StakeEngine<TokenLedger, C>) -> Self {
        let (ledger, engine) = engine.into_parts();
        Self { ledger, engine }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stakeable_ledger::{Ledger, TokenMetadata};
    use stakeable_types::{AccountId, StakingParams, Timestamp, TokenAmount};

    struct Fixed(Timestamp);

    impl Clock for Fixed {
        fn now(&self) -> Timestamp {
            self.0
        }
    }

    fn owner() -> AccountId {
        AccountId::new("owner")
    }

    fn fresh_state() -> StateFile {
        let ledger = TokenLedger::new(
            TokenMetadata {
                name: "MyCoolToken".into(),
                symbol: "MCT".into(),
            },
            owner(),
            TokenAmount::from_tokens(1_000).unwrap(),
        );
        StateFile::new(
            ledger,
            EngineSnapshot {
                params: StakingParams::default(),
                ..EngineSnapshot::default()
            },
        )
    }

    #[test]
    fn load_missing_file_is_not_initialized() {
        let dir = tempfile::tempdir().unwrap();
        let err = StateFile::load(&dir.path().join("state.json")).unwrap_err();
        assert!(matches!(err, CliError::NotInitialized(_)));
    }

    #[test]
    fn engine_state_survives_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut engine = fresh_state().into_engine(Fixed(Timestamp::new(0)));
        engine
            .stake(&owner(), TokenAmount::from_tokens(100).unwrap())
            .unwrap();
        StateFile::from_engine(engine).save(&path).unwrap();

        let reloaded = StateFile::load(&path)
            .unwrap()
            .into_engine(Fixed(Timestamp::new(729 * 3_600)));
        assert_eq!(reloaded.stake_of(&owner()), TokenAmount::from_tokens(100).unwrap());
        assert_eq!(
            reloaded.ledger().balance_of(&owner()),
            TokenAmount::from_tokens(900).unwrap()
        );
        assert_eq!(
            reloaded.pending_reward(&owner()).unwrap(),
            "1.0206".parse::<TokenAmount>().unwrap()
        );
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn garbage_file_is_a_state_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(StateFile::load(&path), Err(CliError::State(_))));
    }
}
