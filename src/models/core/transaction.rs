//! Chain-agnostic transaction record stored per watched address.

use alloy::primitives::U256;
use serde::{Deserialize, Serialize};

/// A confirmed transaction that touched a watched address.
///
/// Values are expressed in the chain's smallest unit (wei). The type is immutable once
/// built; callers receive clones from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
	hash: String,
	from: String,
	/// `None` for contract creations.
	to: Option<String>,
	#[serde(with = "u256_decimal")]
	value: U256,
	block_number: u64,
	/// Unix seconds of the containing block.
	timestamp: u64,
	#[serde(
		default,
		skip_serializing_if = "Option::is_none",
		with = "option_u256_decimal"
	)]
	fee: Option<U256>,
}

impl Transaction {
	/// An empty recipient is normalised to `None`.
	pub fn new(
		hash: impl Into<String>,
		from: impl Into<String>,
		to: Option<String>,
		value: U256,
		block_number: u64,
		timestamp: u64,
	) -> Self {
		Self {
			hash: hash.into(),
			from: from.into(),
			to: to.filter(|to| !to.is_empty()),
			value,
			block_number,
			timestamp,
			fee: None,
		}
	}

	pub fn with_fee(mut self, fee: U256) -> Self {
		self.fee = Some(fee);
		self
	}

	pub fn hash(&self) -> &str {
		&self.hash
	}

	pub fn sender(&self) -> &str {
		&self.from
	}

	pub fn recipient(&self) -> Option<&str> {
		self.to.as_deref()
	}

	pub fn value(&self) -> U256 {
		self.value
	}

	pub fn block_number(&self) -> u64 {
		self.block_number
	}

	pub fn timestamp(&self) -> u64 {
		self.timestamp
	}

	pub fn fee(&self) -> Option<U256> {
		self.fee
	}

	pub fn is_contract_creation(&self) -> bool {
		self.to.is_none()
	}

	/// True when `address` sent this transaction or is its (non-empty) recipient.
	pub fn involves(&self, address: &str) -> bool {
		self.from == address || self.to.as_deref() == Some(address)
	}
}

mod u256_decimal {
	use alloy::primitives::U256;
	use serde::{de::Error, Deserialize, Deserializer, Serializer};

	pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&value.to_string())
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
		let raw = String::deserialize(deserializer)?;
		U256::from_str_radix(&raw, 10).map_err(D::Error::custom)
	}
}

mod option_u256_decimal {
	use alloy::primitives::U256;
	use serde::{de::Error, Deserialize, Deserializer, Serializer};

	pub fn serialize<S: Serializer>(value: &Option<U256>, serializer: S) -> Result<S::Ok, S::Error> {
		match value {
			Some(value) => serializer.serialize_str(&value.to_string()),
			None => serializer.serialize_none(),
		}
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(
		deserializer: D,
	) -> Result<Option<U256>, D::Error> {
		Option::<String>::deserialize(deserializer)?
			.map(|raw| U256::from_str_radix(&raw, 10).map_err(D::Error::custom))
			.transpose()
	}
}
