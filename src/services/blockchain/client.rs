//! Chain client interface.

use alloy::primitives::U256;
use async_trait::async_trait;

use crate::{models::Transaction, services::blockchain::BlockChainError};

/// Length of a `0x`-prefixed 20-byte hex address.
pub const ADDRESS_LENGTH: usize = 42;

/// Syntactic address check: 42 characters starting with `0x`.
///
/// The payload is neither hex-checked nor checksum-validated.
pub fn is_valid_address(address: &str) -> bool {
	address.len() == ADDRESS_LENGTH && address.starts_with("0x")
}

/// Read-only queries against a chain node.
#[async_trait]
pub trait ChainClient: Send + Sync {
	/// Latest block number known to the node.
	async fn current_height(&self) -> Result<u64, BlockChainError>;

	/// Transactions of block `block_number` sent by `address`, or received by it
	/// through a non-empty recipient, in block order.
	async fn transactions_for_address(
		&self,
		address: &str,
		block_number: u64,
	) -> Result<Vec<Transaction>, BlockChainError>;

	/// Balance of `address` in wei at the latest block.
	async fn balance(&self, address: &str) -> Result<U256, BlockChainError>;
}
