use std::sync::Arc;
use std::time::Duration;

use ethers_core::types::{TransactionReceipt, H256, U256};
use ethers_signers::{LocalWallet, Signer};
use rand::Rng;
use tracing::{error, info};

use telegraph_core::encode::{
    encode_cross_chain, encode_mint, encode_send_message, pack_trusted_remote,
};
use telegraph_core::routes::{
    BRIDGE_ROUTES, MESSAGE_RELAY, MINT_VALUE, NFT_CROSS_CHAIN, SEND_MESSAGE_VALUE,
};
use telegraph_core::{ChainClient, ChainError, InputError, Job};

use crate::submitter::Submitter;

/// Whether a run stops after the telegraph send or may continue into the
/// mint-and-bridge branch. Chosen once per run by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Send the telegraph message only.
    SendOnly,
    /// After the send, flip a coin; heads mints an NFT and bridges it.
    MintAndBridge,
}

/// Receipt-poll tuning. The default bound of `None` polls forever;
/// deployments that want a liveness cap set `max_attempts`.
#[derive(Debug, Clone, Copy)]
pub struct ReceiptPoll {
    pub interval: Duration,
    pub max_attempts: Option<u64>,
}

impl Default for ReceiptPoll {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_attempts: None,
        }
    }
}

/// Terminal outcome of one job, as seen by the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Succeeded,
    Failed,
}

/// Drives one account through `SendingMessage → [MintingNFT →
/// BridgingNFT] → Done`. Owns the account's submitter and random source;
/// nothing here is shared across jobs.
pub struct AccountActions<R> {
    client: Arc<dyn ChainClient>,
    submitter: Submitter,
    mode: RunMode,
    poll: ReceiptPoll,
    rng: R,
}

impl<R: Rng> AccountActions<R> {
    pub fn new(
        client: Arc<dyn ChainClient>,
        wallet: LocalWallet,
        gas_buffer: f64,
        mode: RunMode,
        poll: ReceiptPoll,
        rng: R,
    ) -> Self {
        let submitter = Submitter::new(client.clone(), wallet, gas_buffer);
        Self {
            client,
            submitter,
            mode,
            poll,
            rng,
        }
    }

    /// Runs the full action sequence for `job`. Any error is fatal to the
    /// job; the caller owns logging and containment.
    pub async fn run(&mut self, job: &Job) -> Result<(), ChainError> {
        let account = self.submitter.address();
        info!(?account, message = %job.message, "sending telegraph message");
        let data = encode_send_message(&job.message, job.dest_chain_id);
        let tx_hash = self
            .submitter
            .submit(MESSAGE_RELAY, data, SEND_MESSAGE_VALUE.into(), None)
            .await?;
        info!(?account, ?tx_hash, message = %job.message, "telegraph message sent");

        if self.mode == RunMode::SendOnly || !self.rng.gen_bool(0.5) {
            return Ok(());
        }

        let mint_hash = self
            .submitter
            .submit(NFT_CROSS_CHAIN, encode_mint(), MINT_VALUE.into(), None)
            .await?;
        info!(?account, tx_hash = ?mint_hash, "mint submitted, waiting for receipt");
        let token_id = self.wait_for_minted_token(mint_hash).await?;
        info!(?account, %token_id, "nft minted");

        let route = &BRIDGE_ROUTES[self.rng.gen_range(0..BRIDGE_ROUTES.len())];
        let remote = pack_trusted_remote(route.remote, NFT_CROSS_CHAIN);
        let data = encode_cross_chain(route.chain_id, &remote, token_id);
        let bridge_hash = self
            .submitter
            .submit(NFT_CROSS_CHAIN, data, route.fee_value(), None)
            .await?;
        info!(
            ?account,
            tx_hash = ?bridge_hash,
            dest_chain_id = route.chain_id,
            %token_id,
            "nft bridged"
        );
        Ok(())
    }

    /// Polls for the mint receipt until it carries at least one log, then
    /// extracts the minted token id. Sleeps `poll.interval` between
    /// attempts; only stops early when a `max_attempts` bound is set.
    async fn wait_for_minted_token(&self, tx_hash: H256) -> Result<U256, ChainError> {
        let mut attempts = 0u64;
        loop {
            if let Some(receipt) = self.client.transaction_receipt(tx_hash).await? {
                if !receipt.logs.is_empty() {
                    return minted_token_id(&receipt);
                }
            }
            attempts += 1;
            if let Some(max) = self.poll.max_attempts {
                if attempts >= max {
                    return Err(ChainError::ReceiptTimeout(tx_hash));
                }
            }
            tokio::time::sleep(self.poll.interval).await;
        }
    }
}

/// The minted token id lives in the last topic of the third log entry.
/// This is the NFT contract's fixed emission layout, not a general log
/// parser.
fn minted_token_id(receipt: &TransactionReceipt) -> Result<U256, ChainError> {
    let log = receipt
        .logs
        .get(2)
        .ok_or(ChainError::UnexpectedReceipt("missing mint log entry"))?;
    let topic = log
        .topics
        .last()
        .ok_or(ChainError::UnexpectedReceipt("mint log has no topics"))?;
    Ok(U256::from_big_endian(topic.as_bytes()))
}

/// The job boundary: parse the account line, derive the wallet, run the
/// action sequence, and turn whatever happened into a logged
/// [`JobStatus`]. Errors never cross this function; the pool only ever
/// sees outcomes.
pub async fn process_account(line: String, ctx: Arc<JobContext>) -> JobStatus {
    let job: Job = match line.parse() {
        Ok(job) => job,
        Err(err) => {
            error!(error = %err, "skipping malformed account line");
            return JobStatus::Failed;
        }
    };

    let wallet: LocalWallet = match job.private_key.parse() {
        Ok(wallet) => wallet,
        Err(err) => {
            error!(error = %InputError::InvalidKey(err), "skipping account with unusable key");
            return JobStatus::Failed;
        }
    };
    let account = wallet.address();

    let mut actions = AccountActions::new(
        ctx.client.clone(),
        wallet,
        ctx.gas_buffer,
        ctx.mode,
        ctx.poll,
        ctx.rng(),
    );
    match actions.run(&job).await {
        Ok(()) => JobStatus::Succeeded,
        Err(err) => {
            error!(?account, error = %err, message = %job.message, "account run failed");
            JobStatus::Failed
        }
    }
}

/// Everything a worker needs to process one job: the shared read-only
/// client plus run configuration. Cheap to share; all mutable state is
/// constructed per job.
pub struct JobContext {
    pub client: Arc<dyn ChainClient>,
    pub mode: RunMode,
    pub gas_buffer: f64,
    pub poll: ReceiptPoll,
}

impl JobContext {
    fn rng(&self) -> rand::rngs::StdRng {
        use rand::SeedableRng;
        rand::rngs::StdRng::from_entropy()
    }
}
