//! Core primitives for the telegraph fleet sender.
//!
//! This crate contains the chain-client trait and its ethers-backed
//! implementation, pure calldata encoders for the telegraph contracts,
//! the static bridge route table, the per-account job model, and the
//! error taxonomy shared by the agent.

#![warn(missing_docs)]
#![warn(unused_extern_crates)]
#![forbid(unsafe_code)]

/// Async trait over the JSON-RPC surface the agent touches
pub mod chain;

/// Pure calldata builders for the telegraph contracts
pub mod encode;

/// Error taxonomy for job-level failures
pub mod error;

/// One account's unit of work, parsed from an accounts-file line
pub mod job;

/// Contract addresses, chain ids, and the bridge route table
pub mod routes;

/// Scripted chain client for driving failure paths in tests
#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

pub use chain::ChainClient;
pub use error::{ChainError, InputError};
pub use job::Job;
pub use routes::BridgeRoute;
