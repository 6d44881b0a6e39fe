use async_trait::async_trait;
use ethers_core::types::transaction::eip2718::TypedTransaction;
use ethers_core::types::{Address, BlockId, BlockNumber, Bytes, TransactionReceipt, H256, U256};
use ethers_providers::{JsonRpcClient, Middleware, Provider, ProviderError};

/// The slice of the JSON-RPC surface the agent touches, behind a trait so
/// tests can substitute a scripted client.
///
/// Implementations must be cheap to share: one handle is held for the
/// lifetime of the process and used from every worker concurrently.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// `eth_chainId`
    async fn chain_id(&self) -> Result<U256, ProviderError>;

    /// `eth_gasPrice`
    async fn gas_price(&self) -> Result<U256, ProviderError>;

    /// `eth_getTransactionCount` at the *pending* block, so transactions
    /// already queued by the same account are counted.
    async fn pending_nonce(&self, address: Address) -> Result<U256, ProviderError>;

    /// `eth_estimateGas` against the given draft.
    async fn estimate_gas(&self, tx: &TypedTransaction) -> Result<U256, ProviderError>;

    /// `eth_sendRawTransaction`; returns the transaction hash.
    async fn send_raw_transaction(&self, tx: Bytes) -> Result<H256, ProviderError>;

    /// `eth_getTransactionReceipt`; `None` while the transaction is
    /// still pending.
    async fn transaction_receipt(
        &self,
        hash: H256,
    ) -> Result<Option<TransactionReceipt>, ProviderError>;
}

#[async_trait]
impl<P> ChainClient for Provider<P>
where
    P: JsonRpcClient + 'static,
{
    async fn chain_id(&self) -> Result<U256, ProviderError> {
        self.get_chainid().await
    }

    async fn gas_price(&self) -> Result<U256, ProviderError> {
        self.get_gas_price().await
    }

    async fn pending_nonce(&self, address: Address) -> Result<U256, ProviderError> {
        self.get_transaction_count(address, Some(BlockId::Number(BlockNumber::Pending)))
            .await
    }

    async fn estimate_gas(&self, tx: &TypedTransaction) -> Result<U256, ProviderError> {
        Middleware::estimate_gas(self, tx, None).await
    }

    async fn send_raw_transaction(&self, tx: Bytes) -> Result<H256, ProviderError> {
        let pending = Middleware::send_raw_transaction(self, tx).await?;
        Ok(*pending)
    }

    async fn transaction_receipt(
        &self,
        hash: H256,
    ) -> Result<Option<TransactionReceipt>, ProviderError> {
        self.get_transaction_receipt(hash).await
    }
}
