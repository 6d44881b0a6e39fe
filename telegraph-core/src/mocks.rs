#![allow(missing_docs)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use ethers_core::types::transaction::eip2718::TypedTransaction;
use ethers_core::types::{Address, Bytes, Log, TransactionReceipt, H256, U256};
use ethers_providers::ProviderError;

use crate::chain::ChainClient;

/// A scripted [`ChainClient`]. Each RPC surface either follows a queued
/// script (popped per call) or falls back to a fixed default, and every
/// broadcast is captured so tests can assert on what was (not) sent.
pub struct MockChainClient {
    pub chain_id: U256,
    pub gas_price: U256,
    pub nonce: U256,
    /// Per-call script for `estimate_gas`; `Err` holds a message wrapped
    /// into a `ProviderError`. When empty, `default_gas` is returned.
    pub estimate_script: Mutex<VecDeque<Result<U256, String>>>,
    pub default_gas: U256,
    /// When set, every broadcast fails.
    pub fail_broadcast: Mutex<bool>,
    /// Raw transactions that reached `send_raw_transaction`.
    pub broadcasts: Mutex<Vec<Bytes>>,
    /// Per-call script for `transaction_receipt`. When empty, a receipt
    /// with no logs is returned.
    pub receipt_script: Mutex<VecDeque<Option<TransactionReceipt>>>,
}

impl Default for MockChainClient {
    fn default() -> Self {
        Self {
            chain_id: U256::from(324u32),
            gas_price: U256::from(250_000_000u64),
            nonce: U256::from(7u8),
            estimate_script: Mutex::new(VecDeque::new()),
            default_gas: U256::from(600_000u64),
            fail_broadcast: Mutex::new(false),
            broadcasts: Mutex::new(Vec::new()),
            receipt_script: Mutex::new(VecDeque::new()),
        }
    }
}

impl MockChainClient {
    /// Queue `failures` rejected simulations, then (optionally) one
    /// success at `gas`.
    pub fn script_estimates(&self, failures: usize, success: Option<U256>) {
        let mut script = self.estimate_script.lock().unwrap();
        for _ in 0..failures {
            script.push_back(Err("execution reverted".to_string()));
        }
        if let Some(gas) = success {
            script.push_back(Ok(gas));
        }
    }

    pub fn script_receipt(&self, receipt: Option<TransactionReceipt>) {
        self.receipt_script.lock().unwrap().push_back(receipt);
    }

    pub fn broadcast_count(&self) -> usize {
        self.broadcasts.lock().unwrap().len()
    }
}

/// A receipt whose logs are exactly `logs`, for driving the mint flow.
pub fn receipt_with_logs(logs: Vec<Log>) -> TransactionReceipt {
    TransactionReceipt {
        logs,
        ..Default::default()
    }
}

/// A log whose topics end with `token_id`, big-endian.
pub fn log_with_token_topic(token_id: U256) -> Log {
    let mut topic = [0u8; 32];
    token_id.to_big_endian(&mut topic);
    Log {
        address: Address::zero(),
        topics: vec![H256::zero(), H256::zero(), H256::from(topic)],
        ..Default::default()
    }
}

#[async_trait]
impl ChainClient for MockChainClient {
    async fn chain_id(&self) -> Result<U256, ProviderError> {
        Ok(self.chain_id)
    }

    async fn gas_price(&self) -> Result<U256, ProviderError> {
        Ok(self.gas_price)
    }

    async fn pending_nonce(&self, _address: Address) -> Result<U256, ProviderError> {
        Ok(self.nonce)
    }

    async fn estimate_gas(&self, _tx: &TypedTransaction) -> Result<U256, ProviderError> {
        match self.estimate_script.lock().unwrap().pop_front() {
            Some(Ok(gas)) => Ok(gas),
            Some(Err(msg)) => Err(ProviderError::CustomError(msg)),
            None => Ok(self.default_gas),
        }
    }

    async fn send_raw_transaction(&self, tx: Bytes) -> Result<H256, ProviderError> {
        if *self.fail_broadcast.lock().unwrap() {
            return Err(ProviderError::CustomError("broadcast refused".to_string()));
        }
        let mut broadcasts = self.broadcasts.lock().unwrap();
        broadcasts.push(tx);
        Ok(H256::from_low_u64_be(broadcasts.len() as u64))
    }

    async fn transaction_receipt(
        &self,
        _hash: H256,
    ) -> Result<Option<TransactionReceipt>, ProviderError> {
        match self.receipt_script.lock().unwrap().pop_front() {
            Some(receipt) => Ok(receipt),
            None => Ok(Some(TransactionReceipt::default())),
        }
    }
}
