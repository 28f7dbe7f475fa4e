//! Operations exposed to the outside world.
//!
//! The facade ties the chain client and both repositories together so that the API
//! layer depends on a single trait object.

use std::sync::Arc;

use alloy::primitives::U256;
use async_trait::async_trait;

use crate::{
	models::Transaction,
	repositories::{SubscriptionRepositoryTrait, TransactionRepositoryTrait},
	services::blockchain::{BlockChainError, ChainClient},
};

#[async_trait]
pub trait AddressMonitorTrait: Send + Sync {
	/// Latest block number, read live from the node.
	async fn get_current_block(&self) -> Result<u64, BlockChainError>;

	/// Adds `address` to the watch set. `false` if it was already watched.
	async fn subscribe(&self, address: &str) -> bool;

	/// Transactions stored for `address`, oldest first. Empty when unknown.
	async fn get_transactions(&self, address: &str) -> Vec<Transaction>;

	/// Balance in wei, read live from the node.
	async fn get_balance(&self, address: &str) -> Result<U256, BlockChainError>;
}

pub struct AddressMonitor<C: ?Sized, S: ?Sized, T: ?Sized> {
	client: Arc<C>,
	subscriptions: Arc<S>,
	transactions: Arc<T>,
}

impl<C: ?Sized, S: ?Sized, T: ?Sized> AddressMonitor<C, S, T> {
	pub fn new(client: Arc<C>, subscriptions: Arc<S>, transactions: Arc<T>) -> Self {
		Self {
			client,
			subscriptions,
			transactions,
		}
	}
}

#[async_trait]
impl<C, S, T> AddressMonitorTrait for AddressMonitor<C, S, T>
where
	C: ChainClient + ?Sized,
	S: SubscriptionRepositoryTrait + ?Sized,
	T: TransactionRepositoryTrait + ?Sized,
{
	async fn get_current_block(&self) -> Result<u64, BlockChainError> {
		self.client.current_height().await
	}

	async fn subscribe(&self, address: &str) -> bool {
		self.subscriptions.subscribe(address).await
	}

	async fn get_transactions(&self, address: &str) -> Vec<Transaction> {
		self.transactions.list(address).await
	}

	async fn get_balance(&self, address: &str) -> Result<U256, BlockChainError> {
		self.client.balance(address).await
	}
}
