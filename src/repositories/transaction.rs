//! Transaction store: append-only ledger of matches per watched address.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::Transaction;

#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
	/// Appends `transaction` to the sequence of `address`. Duplicates are kept.
	async fn append(&self, address: &str, transaction: Transaction);

	/// Transactions of `address` in append order. Unknown addresses yield an empty list.
	async fn list(&self, address: &str) -> Vec<Transaction>;
}

#[derive(Debug, Default)]
pub struct TransactionRepository {
	transactions: RwLock<HashMap<String, Vec<Transaction>>>,
}

impl TransactionRepository {
	pub fn new() -> Self {
		Self::default()
	}
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
	async fn append(&self, address: &str, transaction: Transaction) {
		self.transactions
			.write()
			.await
			.entry(address.to_string())
			.or_default()
			.push(transaction);
	}

	async fn list(&self, address: &str) -> Vec<Transaction> {
		self.transactions
			.read()
			.await
			.get(address)
			.cloned()
			.unwrap_or_default()
	}
}
