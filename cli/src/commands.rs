//! Subcommands and their execution against the state file.

use anyhow::Context;
use stakeable_ledger::{Ledger, TokenLedger, TokenMetadata};
use stakeable_stake::rate::annual_yield_bps;
use stakeable_stake::{projected_annual_reward, EngineSnapshot, StakeEngine};
use stakeable_types::{AccountId, Clock, TokenAmount};
use stakeable_utils::{format_countdown, format_duration};
use std::fmt::Display;
use std::io::Write;
use std::path::Path;

use crate::{CliClock, CliConfig, CliError, StateFile};

type Engine = StakeEngine<TokenLedger, CliClock>;

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Create the state file and mint the initial supply to the owner.
    Init {
        /// Overwrite an existing state file.
        #[arg(long)]
        force: bool,
    },
    /// Print an account's liquid balance.
    Balance { account: AccountId },
    /// Move liquid tokens between accounts.
    Transfer {
        from: AccountId,
        to: AccountId,
        amount: TokenAmount,
    },
    /// Hand the owner role to another account.
    TransferOwnership {
        caller: AccountId,
        new_owner: AccountId,
    },
    /// Lock tokens into the account's stake, compounding any reward.
    Stake {
        account: AccountId,
        amount: TokenAmount,
    },
    /// Settle accrued reward and print the unclaimed total.
    Claim { account: AccountId },
    /// Queue reward (then principal) for withdrawal after the lock.
    ClaimAndWithdraw {
        account: AccountId,
        amount: TokenAmount,
    },
    /// Pay out a queued withdrawal once unlocked.
    Withdraw { account: AccountId },
    /// Print the account's stake record.
    Show { account: AccountId },
}

impl Command {
    /// Whether a successful run must be written back to the state file.
    pub fn mutates(&self) -> bool {
        !matches!(self, Command::Balance { .. } | Command::Show { .. })
    }
}

/// Run one subcommand: load the state, apply the command, and save only if
/// it changed state and succeeded.
pub fn execute(
    config: &CliConfig,
    clock: CliClock,
    command: Command,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let path = config.state_file.as_path();
    if let Command::Init { force } = command {
        return init(config, path, force, out);
    }

    let state = StateFile::load(path).context("loading state")?;
    let mut engine = state.into_engine(clock);
    let mutates = command.mutates();
    run(&mut engine, command, out)?;

    if mutates {
        StateFile::from_engine(engine)
            .save(path)
            .context("saving state")?;
    }
    Ok(())
}

/// Write a fresh state file with the configured supply minted to the owner.
pub fn init(
    config: &CliConfig,
    path: &Path,
    force: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if path.exists() && !force {
        return Err(CliError::AlreadyInitialized(path.to_path_buf()).into());
    }
    let ledger = TokenLedger::new(
        TokenMetadata {
            name: config.token_name.clone(),
            symbol: config.token_symbol.clone(),
        },
        config.owner.clone(),
        config.initial_supply_amount()?,
    );
    let engine = EngineSnapshot {
        params: config.staking_params(),
        ..EngineSnapshot::default()
    };
    StateFile::new(ledger, engine)
        .save(path)
        .context("writing initial state")?;
    writeln!(
        out,
        "minted {} {} to {}",
        config.initial_supply, config.token_symbol, config.owner
    )?;
    Ok(())
}

/// Log a rejected operation and turn it into the binary's error.
fn rejected<E>(op: &str, account: &AccountId, err: E) -> anyhow::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    tracing::warn!(%account, error = %err, "{op} rejected");
    anyhow::Error::new(err).context(format!("{op} for {account}"))
}

fn run(engine: &mut Engine, command: Command, out: &mut impl Write) -> anyhow::Result<()> {
    let symbol = engine.ledger().symbol().to_string();
    match command {
        Command::Init { .. } => anyhow::bail!("init does not run against an existing state"),
        Command::Balance { account } => {
            writeln!(out, "{} {symbol}", engine.ledger().balance_of(&account))?;
        }
        Command::Transfer { from, to, amount } => {
            engine
                .ledger_mut()
                .transfer(&from, &to, amount)
                .map_err(|e| rejected("transfer", &from, e))?;
            writeln!(out, "transferred {amount} {symbol} from {from} to {to}")?;
        }
        Command::TransferOwnership { caller, new_owner } => {
            engine
                .ledger_mut()
                .transfer_ownership(&caller, new_owner.clone())
                .map_err(|e| rejected("transfer-ownership", &caller, e))?;
            writeln!(out, "owner is now {new_owner}")?;
        }
        Command::Stake { account, amount } => {
            engine
                .stake(&account, amount)
                .map_err(|e| rejected("stake", &account, e))?;
            let view = engine.get_stake(&account);
            writeln!(
                out,
                "staked {amount} {symbol}; principal {} at rate {}",
                view.principal, view.rate
            )?;
        }
        Command::Claim { account } => {
            let reward = engine
                .claim(&account)
                .map_err(|e| rejected("claim", &account, e))?;
            writeln!(out, "unclaimed reward {reward} {symbol}")?;
        }
        Command::ClaimAndWithdraw { account, amount } => {
            engine
                .claim_and_withdraw(&account, amount)
                .map_err(|e| rejected("claim-and-withdraw", &account, e))?;
            let record = engine.record(&account).cloned().unwrap_or_default();
            writeln!(
                out,
                "queued {amount} {symbol}; {} pending until {}",
                record.pending_withdraw, record.unlock_at
            )?;
        }
        Command::Withdraw { account } => {
            let paid = engine
                .withdraw(&account)
                .map_err(|e| rejected("withdraw", &account, e))?;
            writeln!(out, "withdrew {paid} {symbol}")?;
        }
        Command::Show { account } => show(engine, &account, &symbol, out)?,
    }
    Ok(())
}

fn show(
    engine: &Engine,
    account: &AccountId,
    symbol: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let view = engine.get_stake(account);
    let (principal, rate, accrual_start, withdrawn_total, pending_withdraw, unclaimed_reward) =
        view.into_tuple();

    line(out, "principal", format!("{principal} {symbol}"))?;
    line(out, "rate", rate)?;
    line(out, "accrual_start", accrual_start)?;
    line(out, "withdrawn_total", format!("{withdrawn_total} {symbol}"))?;
    line(out, "pending_withdraw", format!("{pending_withdraw} {symbol}"))?;
    line(out, "unclaimed_reward", format!("{unclaimed_reward} {symbol}"))?;
    line(out, "state", format!("{:?}", engine.state_of(account)))?;

    let pending = engine
        .pending_reward(account)
        .map_err(|e| rejected("show", account, e))?;
    line(out, "pending_reward", format!("{pending} {symbol}"))?;

    let annual = projected_annual_reward(rate).context("annual reward overflows")?;
    let bps = annual_yield_bps(principal).context("annual yield overflows")?;
    line(
        out,
        "staking_year_reward",
        format!("{annual} {symbol} ({}.{:02}%)", bps / 100, bps % 100),
    )?;
    line(
        out,
        "withdraw_delay",
        format_duration(engine.params().withdraw_delay_secs),
    )?;

    if let Some(record) = engine.record(account) {
        if !record.pending_withdraw.is_zero() {
            let now = engine.clock().now();
            line(
                out,
                "withdrawal",
                format_countdown(now.as_secs(), record.unlock_at.as_secs()),
            )?;
        }
    }
    Ok(())
}

fn line(out: &mut impl Write, label: &str, value: impl Display) -> std::io::Result<()> {
    writeln!(out, "{label:<20} {value}")
}
