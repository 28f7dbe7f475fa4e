//! Transaction object as embedded in an `eth_getBlockByNumber` response.

use serde::{Deserialize, Serialize};

use crate::{
	models::Transaction,
	utils::{parse_hex_u256, parse_hex_u64},
};

/// Raw EVM transaction, numeric fields still hex-encoded.
///
/// Only the fields needed to attribute a transaction to an address are kept; the
/// rest of the RPC object is ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EVMTransaction {
	pub hash: String,
	pub from: String,
	/// Null or absent for contract creations.
	#[serde(default)]
	pub to: Option<String>,
	pub value: String,
	#[serde(default)]
	pub block_number: Option<String>,
}

impl EVMTransaction {
	/// Sent by `address`, or received by it through a non-empty recipient.
	pub fn involves(&self, address: &str) -> bool {
		if self.from == address {
			return true;
		}
		matches!(self.to.as_deref(), Some(to) if !to.is_empty() && to == address)
	}

	/// Decodes into a [`Transaction`], using the block's values where the
	/// transaction itself does not carry them.
	pub fn decode(&self, block_number: Option<&str>, timestamp: u64) -> Result<Transaction, String> {
		let value = parse_hex_u256(&self.value)?;
		let number = self
			.block_number
			.as_deref()
			.or(block_number)
			.ok_or_else(|| format!("Transaction {} has no block number", self.hash))?;

		Ok(Transaction::new(
			self.hash.clone(),
			self.from.clone(),
			self.to.clone(),
			value,
			parse_hex_u64(number)?,
			timestamp,
		))
	}
}
