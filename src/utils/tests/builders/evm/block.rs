//! Builders for raw `eth_getBlockByNumber` payloads, as a node would return them.

use serde_json::{json, Value};

pub struct RpcTransactionBuilder {
	hash: String,
	from: String,
	to: Option<String>,
	value: String,
}

impl Default for RpcTransactionBuilder {
	fn default() -> Self {
		Self {
			hash: format!("0x{}", "cd".repeat(32)),
			from: "0x3333333333333333333333333333333333333333".to_string(),
			to: Some("0x4444444444444444444444444444444444444444".to_string()),
			value: "0x0".to_string(),
		}
	}
}

impl RpcTransactionBuilder {
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

	/// Recipient serialized as `null`.
	pub fn contract_creation(mut self) -> Self {
		self.to = None;
		self
	}

	/// Raw hex value, not validated.
	pub fn value(mut self, value: &str) -> Self {
		self.value = value.to_string();
		self
	}

	pub fn build(self) -> Value {
		json!({
			"hash": self.hash,
			"from": self.from,
			"to": self.to,
			"value": self.value,
			"gas": "0x5208",
			"input": "0x",
		})
	}
}

pub struct RpcBlockBuilder {
	number: u64,
	timestamp: u64,
	transactions: Vec<Value>,
}

impl Default for RpcBlockBuilder {
	fn default() -> Self {
		Self {
			number: 100,
			timestamp: 1_700_000_000,
			transactions: Vec::new(),
		}
	}
}

impl RpcBlockBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn number(mut self, number: u64) -> Self {
		self.number = number;
		self
	}

	pub fn timestamp(mut self, timestamp: u64) -> Self {
		self.timestamp = timestamp;
		self
	}

	pub fn transaction(mut self, transaction: Value) -> Self {
		self.transactions.push(transaction);
		self
	}

	/// The block object, with `blockNumber` filled into every transaction.
	pub fn build(self) -> Value {
		let number = format!("0x{:x}", self.number);
		let transactions: Vec<Value> = self
			.transactions
			.into_iter()
			.map(|mut tx| {
				if let Some(obj) = tx.as_object_mut() {
					obj.entry("blockNumber").or_insert_with(|| json!(number));
				}
				tx
			})
			.collect();

		json!({
			"number": number,
			"hash": format!("0x{:064x}", self.number),
			"timestamp": format!("0x{:x}", self.timestamp),
			"transactions": transactions,
		})
	}
}

/// Wraps `result` in a JSON-RPC 2.0 response envelope.
pub fn rpc_response(result: Value) -> Value {
	json!({ "jsonrpc": "2.0", "id": 1, "result": result })
}
