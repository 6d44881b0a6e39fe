use std::sync::Arc;

use ethers_core::types::transaction::eip2718::TypedTransaction;
use ethers_core::types::{Address, Bytes, Eip1559TransactionRequest, H256, U256};
use ethers_signers::{LocalWallet, Signer};
use tracing::debug;

use telegraph_core::{ChainClient, ChainError};

use crate::fees::FeeEstimator;

/// Builds, signs, and broadcasts one EIP-1559 transaction per call for a
/// single account. The signing key never leaves the process; signing is
/// local and only the raw signed bytes go over the wire.
pub struct Submitter {
    client: Arc<dyn ChainClient>,
    wallet: LocalWallet,
    fees: FeeEstimator,
}

impl Submitter {
    pub fn new(client: Arc<dyn ChainClient>, wallet: LocalWallet, gas_buffer: f64) -> Self {
        let fees = FeeEstimator::new(client.clone(), gas_buffer);
        Self {
            client,
            wallet,
            fees,
        }
    }

    /// The submitting account's address.
    pub fn address(&self) -> Address {
        self.wallet.address()
    }

    /// Assembles and broadcasts a call to `to` with the given calldata
    /// and native value, returning the transaction hash. The nonce is the
    /// account's *pending* transaction count, fetched fresh for every
    /// submission. A gas-estimation failure is fatal to the job; all
    /// other failures propagate unmodified, unretried.
    pub async fn submit(
        &self,
        to: Address,
        data: Bytes,
        value: U256,
        explicit_gas: Option<U256>,
    ) -> Result<H256, ChainError> {
        let chain_id = self.client.chain_id().await?;
        let draft: TypedTransaction = Eip1559TransactionRequest::new()
            .from(self.address())
            .to(to)
            .chain_id(chain_id.as_u64())
            .data(data)
            .value(value)
            .into();

        let gas_limit = self.fees.gas_limit(&draft, explicit_gas).await?;
        let (max_priority_fee, max_fee) = self.fees.fee_pair().await?;
        let nonce = self.client.pending_nonce(self.address()).await?;

        let mut tx = draft;
        tx.set_gas(gas_limit);
        tx.set_nonce(nonce);
        if let TypedTransaction::Eip1559(ref mut request) = tx {
            request.max_priority_fee_per_gas = Some(max_priority_fee);
            request.max_fee_per_gas = Some(max_fee);
        }

        let signature = self.wallet.sign_transaction(&tx).await?;
        let raw = tx.rlp_signed(&signature);
        debug!(to = ?to, gas = ?gas_limit, nonce = ?nonce, "broadcasting signed transaction");
        Ok(self.client.send_raw_transaction(raw).await?)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use ethers_core::types::transaction::eip2718::TypedTransaction;
    use ethers_core::utils::rlp::Rlp;
    use telegraph_core::mocks::MockChainClient;
    use telegraph_core::routes::MESSAGE_RELAY;

    fn wallet() -> LocalWallet {
        "0x0000000000000000000000000000000000000000000000000000000000000001"
            .parse()
            .unwrap()
    }

    fn submitter(client: Arc<MockChainClient>) -> Submitter {
        Submitter::new(client, wallet(), 1.05)
    }

    #[tokio::test]
    async fn broadcast_carries_pending_nonce_and_aliased_fees() {
        let client = Arc::new(MockChainClient::default());
        let hash = submitter(client.clone())
            .submit(
                MESSAGE_RELAY,
                Bytes::from(vec![0xde, 0xad]),
                U256::from(700u64),
                None,
            )
            .await
            .unwrap();
        assert_eq!(hash, H256::from_low_u64_be(1));

        let broadcasts = client.broadcasts.lock().unwrap();
        assert_eq!(broadcasts.len(), 1);
        // Raw bytes are a typed (0x02) envelope; decode it and check
        // the fields that matter.
        let raw = &broadcasts[0];
        assert_eq!(raw[0], 0x02);
        let (decoded, _sig) =
            TypedTransaction::decode_signed(&Rlp::new(raw)).expect("decodable envelope");
        assert_eq!(decoded.nonce(), Some(&client.nonce));
        match decoded {
            TypedTransaction::Eip1559(request) => {
                assert_eq!(request.max_priority_fee_per_gas, Some(client.gas_price));
                assert_eq!(request.max_fee_per_gas, Some(client.gas_price));
                assert_eq!(request.value, Some(U256::from(700u64)));
            }
            other => panic!("expected an EIP-1559 envelope, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn estimation_failure_means_nothing_is_broadcast() {
        let client = Arc::new(MockChainClient::default());
        client.script_estimates(3, None);
        let err = submitter(client.clone())
            .submit(MESSAGE_RELAY, Bytes::new(), U256::zero(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ChainError::GasEstimationFailed { .. }));
        assert_eq!(client.broadcast_count(), 0);
    }

    #[tokio::test]
    async fn broadcast_failure_propagates_as_submission_error() {
        let client = Arc::new(MockChainClient::default());
        *client.fail_broadcast.lock().unwrap() = true;
        let err = submitter(client.clone())
            .submit(MESSAGE_RELAY, Bytes::new(), U256::zero(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ChainError::SubmissionFailed(_)));
    }
}
