//! Builder for test [`Transaction`] instances.

use alloy::primitives::U256;

use crate::models::Transaction;

pub struct TransactionBuilder {
	hash: String,
	from: String,
	to: Option<String>,
	value: U256,
	block_number: u64,
	timestamp: u64,
	fee: Option<U256>,
}

impl Default for TransactionBuilder {
	fn default() -> Self {
		Self {
			hash: format!("0x{}", "ab".repeat(32)),
			from: "0x1111111111111111111111111111111111111111".to_string(),
			to: Some("0x2222222222222222222222222222222222222222".to_string()),
			value: U256::from(1_000_000_000_000_000_000u64),
			block_number: 100,
			timestamp: 1_700_000_000,
			fee: None,
		}
	}
}

impl TransactionBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn hash(mut self, hash: &str) -> Self {
		self.hash = hash.to_string();
		self
	}

	pub fn from(mut self, from: &str) -> Self {
		self.from = from.to_string();
		self
	}

	pub fn to(mut self, to: &str) -> Self {
		self.to = Some(to.to_string());
		self
	}

	pub fn contract_creation(mut self) -> Self {
		self.to = None;
		self
	}

	pub fn value(mut self, value: U256) -> Self {
		self.value = value;
		self
	}

	pub fn block_number(mut self, block_number: u64) -> Self {
		self.block_number = block_number;
		self
	}

	pub fn timestamp(mut self, timestamp: u64) -> Self {
		self.timestamp = timestamp;
		self
	}

	pub fn fee(mut self, fee: U256) -> Self {
		self.fee = Some(fee);
		self
	}

	pub fn build(self) -> Transaction {
		let tx = Transaction::new(
			self.hash,
			self.from,
			self.to,
			self.value,
			self.block_number,
			self.timestamp,
		);
		match self.fee {
			Some(fee) => tx.with_fee(fee),
			None => tx,
		}
	}
}
