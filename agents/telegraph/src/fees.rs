use std::sync::Arc;

use ethers_core::types::transaction::eip2718::TypedTransaction;
use ethers_core::types::U256;
use tracing::warn;

use telegraph_core::error::GAS_ESTIMATE_ATTEMPTS;
use telegraph_core::{ChainClient, ChainError};

/// Gas and fee oracle for one submission. Nothing is cached: every call
/// re-queries the chain, trading round-trips for correctness while many
/// accounts submit concurrently.
#[derive(Clone)]
pub struct FeeEstimator {
    client: Arc<dyn ChainClient>,
    gas_buffer: f64,
}

impl FeeEstimator {
    pub fn new(client: Arc<dyn ChainClient>, gas_buffer: f64) -> Self {
        Self { client, gas_buffer }
    }

    /// Simulates the draft to get a gas estimate, retrying up to
    /// [`GAS_ESTIMATE_ATTEMPTS`] times. Exhausting the attempts is fatal
    /// to the job; no other fee level is tried.
    pub async fn estimate_gas(&self, draft: &TypedTransaction) -> Result<U256, ChainError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.client.estimate_gas(draft).await {
                Ok(gas) => return Ok(gas),
                Err(source) if attempt >= GAS_ESTIMATE_ATTEMPTS => {
                    return Err(ChainError::GasEstimationFailed {
                        attempts: attempt,
                        source,
                    })
                }
                Err(err) => {
                    warn!(attempt, error = %err, "gas estimation attempt failed");
                }
            }
        }
    }

    /// The gas limit to submit with: the caller's explicit gas when it
    /// covers the estimate, otherwise the estimate with the buffer
    /// applied.
    pub async fn gas_limit(
        &self,
        draft: &TypedTransaction,
        explicit: Option<U256>,
    ) -> Result<U256, ChainError> {
        let estimated = self.estimate_gas(draft).await?;
        Ok(match explicit {
            Some(gas) if gas >= estimated => gas,
            _ => self.buffered(estimated),
        })
    }

    /// One `eth_gasPrice` snapshot returned as both the priority and the
    /// max fee. Deliberately not an EIP-1559 base/priority split; the
    /// chain this drives accepts the aliased pair.
    pub async fn fee_pair(&self) -> Result<(U256, U256), ChainError> {
        let gas_price = self.client.gas_price().await?;
        Ok((gas_price, gas_price))
    }

    fn buffered(&self, estimated: U256) -> U256 {
        U256::from((estimated.as_u64() as f64 * self.gas_buffer).round() as u64)
    }
}
