use ethers_core::types::H256;
use ethers_providers::ProviderError;
use ethers_signers::WalletError;

/// Number of consecutive `eth_estimateGas` attempts before a draft is
/// declared unsendable.
pub const GAS_ESTIMATE_ATTEMPTS: u32 = 3;

/// Failures raised while driving one account's actions. All variants are
/// fatal to the enclosing job; none are retried past this layer.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    /// The simulation endpoint rejected the draft on every attempt.
    /// Carries the last provider error; no broadcast was made.
    #[error("gas estimation failed after {attempts} attempts: {source}")]
    GasEstimationFailed {
        /// How many simulation attempts were made.
        attempts: u32,
        /// The error returned by the final attempt.
        #[source]
        source: ProviderError,
    },

    /// Nonce fetch, fee query, or broadcast failed. Passed through
    /// unmodified; retry policy lives only in gas estimation.
    #[error("transaction submission failed: {0}")]
    SubmissionFailed(#[from] ProviderError),

    /// Local signing failed.
    #[error("wallet error: {0}")]
    Wallet(#[from] WalletError),

    /// A receipt arrived but does not carry the expected mint log layout.
    #[error("unexpected receipt shape: {0}")]
    UnexpectedReceipt(&'static str),

    /// The configured receipt-poll bound was exhausted.
    #[error("gave up waiting for receipt of {0:?}")]
    ReceiptTimeout(H256),
}

/// A malformed accounts-file record. Raised inside the job boundary, so
/// one bad line is logged and abandoned without touching other jobs.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// The line does not split into `private_key:message:dest_chain_id`.
    #[error("malformed account line: expected private_key:message:dest_chain_id")]
    MalformedLine,

    /// The destination chain id is not a `u16`.
    #[error("invalid destination chain id {0:?}")]
    InvalidChainId(String),

    /// The private key does not parse into a signing key.
    #[error("invalid private key: {0}")]
    InvalidKey(#[source] WalletError),
}
