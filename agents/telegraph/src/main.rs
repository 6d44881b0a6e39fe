//! Telegraph fleet sender. Drains a queue of per-account jobs through a
//! fixed-width worker pool, sending a telegraph message for every
//! account and, when the operator enables it, minting and bridging an
//! NFT afterwards.

#![forbid(unsafe_code)]
#![warn(unused_extern_crates)]

mod actions;
mod fees;
mod pool;
mod settings;
mod submitter;

use std::io::{BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use ethers_providers::{Http, Provider};
use tracing::info;
use tracing_subscriber::EnvFilter;

use telegraph_core::routes::MESSAGE_RELAY;

use crate::actions::{process_account, JobContext, JobStatus, ReceiptPoll, RunMode};
use crate::pool::WorkerPool;
use crate::settings::Settings;

async fn _main(settings: Settings, accounts: Vec<String>, mode: RunMode) -> Result<()> {
    let provider = Provider::<Http>::try_from(settings.rpc_url.as_str())
        .wrap_err("invalid rpc_url in settings")?;
    let ctx = Arc::new(JobContext {
        client: Arc::new(provider),
        mode,
        gas_buffer: settings.gas_buffer,
        poll: ReceiptPoll {
            interval: Duration::from_secs(settings.receipt_poll_seconds),
            max_attempts: settings.receipt_poll_max_attempts,
        },
    });

    let pool = WorkerPool::new(settings.workers);
    let handler = move |line| process_account(line, ctx.clone());

    tokio::select! {
        outcomes = pool.run(accounts, handler) => {
            let failed = outcomes
                .iter()
                .filter(|status| **status == JobStatus::Failed)
                .count();
            info!(total = outcomes.len(), failed, "fleet run complete");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Exiting...");
        }
    }
    Ok(())
}

fn setup() -> Result<Settings> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    Settings::new().wrap_err("failed to load settings")
}

/// Waits for the operator to press Enter before any transaction goes out.
fn confirm_start() -> Result<()> {
    print!("Press Enter to start the run (Ctrl-C to abort): ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(())
}

/// Asks whether this run should mint and bridge NFTs after each send.
fn prompt_run_mode() -> Result<RunMode> {
    print!("Enable mint-and-bridge for this run? [y/N]: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => RunMode::MintAndBridge,
        _ => RunMode::SendOnly,
    })
}

fn main() -> Result<()> {
    let settings = setup()?;

    let accounts: Vec<String> = std::fs::read_to_string(&settings.accounts_file)
        .wrap_err_with(|| format!("failed to read accounts file {}", settings.accounts_file))?
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect();

    info!(
        rpc_url = %settings.rpc_url,
        relay = ?MESSAGE_RELAY,
        accounts = accounts.len(),
        workers = settings.workers,
        "loaded fleet configuration"
    );

    confirm_start()?;
    let mode = prompt_run_mode()?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .wrap_err("failed to start runtime")?
        .block_on(_main(settings, accounts, mode))
}
