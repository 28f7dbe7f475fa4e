//! Mock implementation of the chain client.
//!
//! Lets the polling engine and the facade be driven through scripted heights and
//! lookups without network connections.

use address_monitor::{
	models::Transaction,
	services::blockchain::{BlockChainError, ChainClient},
};
use alloy::primitives::U256;
use async_trait::async_trait;
use mockall::mock;

mock! {
	pub ChainClient {}

	#[async_trait]
	impl ChainClient for ChainClient {
		async fn current_height(&self) -> Result<u64, BlockChainError>;
		async fn transactions_for_address(
			&self,
			address: &str,
			block_number: u64,
		) -> Result<Vec<Transaction>, BlockChainError>;
		async fn balance(&self, address: &str) -> Result<U256, BlockChainError>;
	}
}
