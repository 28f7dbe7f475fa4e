//! Block object returned by `eth_getBlockByNumber` with full transactions.

use serde::{Deserialize, Serialize};

use super::EVMTransaction;
use crate::{models::Transaction, utils::parse_hex_u64};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EVMBlock {
	#[serde(default)]
	pub number: Option<String>,
	#[serde(default)]
	pub hash: Option<String>,
	pub timestamp: String,
	#[serde(default)]
	pub transactions: Vec<EVMTransaction>,
}

impl EVMBlock {
	/// Decodes the transactions of this block that involve `address`, in block order.
	///
	/// Only matching transactions are decoded, so malformed entries unrelated to
	/// `address` do not fail the lookup.
	pub fn transactions_for(&self, address: &str) -> Result<Vec<Transaction>, String> {
		let matching: Vec<&EVMTransaction> = self
			.transactions
			.iter()
			.filter(|tx| tx.involves(address))
			.collect();
		if matching.is_empty() {
			return Ok(Vec::new());
		}

		let timestamp = parse_hex_u64(&self.timestamp)?;
		matching
			.into_iter()
			.map(|tx| tx.decode(self.number.as_deref(), timestamp))
			.collect()
	}
}
