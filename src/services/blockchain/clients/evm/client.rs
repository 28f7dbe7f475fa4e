//! EVM chain client over a JSON-RPC transport.

use alloy::primitives::U256;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::instrument;

use crate::{
	models::{EVMBlock, ServiceConfig, Transaction},
	services::blockchain::{
		client::{is_valid_address, ChainClient},
		transports::{BlockchainTransport, HttpTransportClient},
		BlockChainError,
	},
	utils::{parse_hex_u256, parse_hex_u64},
};

#[derive(Clone)]
pub struct EvmClient<T: Send + Sync + Clone> {
	http_client: T,
}

impl<T: Send + Sync + Clone> EvmClient<T> {
	pub fn new_with_transport(http_client: T) -> Self {
		Self { http_client }
	}

	pub fn transport(&self) -> &T {
		&self.http_client
	}
}

impl EvmClient<HttpTransportClient> {
	pub fn new(config: &ServiceConfig) -> Result<Self, anyhow::Error> {
		let transport = HttpTransportClient::new(&config.rpc_url, &config.rpc_retry)?;
		Ok(Self::new_with_transport(transport))
	}
}

fn single(key: &str, value: impl Into<String>) -> Option<HashMap<String, String>> {
	Some(HashMap::from([(key.to_string(), value.into())]))
}

fn ensure_valid_address(address: &str) -> Result<(), BlockChainError> {
	if is_valid_address(address) {
		Ok(())
	} else {
		Err(BlockChainError::invalid_address(
			format!("'{}' is not a 0x-prefixed 42 character address", address),
			None,
			single("address", address),
		))
	}
}

/// Extracts `result` from a JSON-RPC envelope.
fn take_result(
	mut response: Value,
	method: &str,
) -> Result<Value, BlockChainError> {
	match response.get_mut("result") {
		Some(result) => Ok(result.take()),
		None => Err(BlockChainError::decode_error(
			format!("Missing 'result' field in {} response", method),
			None,
			single("method", method),
		)),
	}
}

fn hex_result<'a>(result: &'a Value, method: &str) -> Result<&'a str, BlockChainError> {
	result.as_str().ok_or_else(|| {
		BlockChainError::decode_error(
			format!("Expected a hex string in {} response, got {}", method, result),
			None,
			single("method", method),
		)
	})
}

#[async_trait]
impl<T: Send + Sync + Clone + BlockchainTransport> ChainClient for EvmClient<T> {
	#[instrument(skip(self))]
	async fn current_height(&self) -> Result<u64, BlockChainError> {
		let method = "eth_blockNumber";
		let response = self
			.http_client
			.send_raw_request::<Value>(method, None)
			.await
			.map_err(|e| BlockChainError::from_transport("Failed to get block number", e, None))?;

		let result = take_result(response, method)?;
		parse_hex_u64(hex_result(&result, method)?).map_err(|e| {
			BlockChainError::decode_error(
				format!("Failed to parse block number: {}", e),
				None,
				single("method", method),
			)
		})
	}

	#[instrument(skip(self))]
	async fn transactions_for_address(
		&self,
		address: &str,
		block_number: u64,
	) -> Result<Vec<Transaction>, BlockChainError> {
		ensure_valid_address(address)?;

		let method = "eth_getBlockByNumber";
		let metadata = Some(HashMap::from([
			("address".to_string(), address.to_string()),
			("block_number".to_string(), block_number.to_string()),
		]));

		let response = self
			.http_client
			.send_raw_request(method, Some(json!([format!("0x{:x}", block_number), true])))
			.await
			.map_err(|e| {
				BlockChainError::from_transport("Failed to get block", e, metadata.clone())
			})?;

		let result = take_result(response, method)?;
		if result.is_null() {
			// The node has not caught up to the height it reported.
			return Err(BlockChainError::transport_error(
				"Block not found",
				None,
				metadata,
			));
		}

		let block: EVMBlock = serde_json::from_value(result).map_err(|e| {
			BlockChainError::decode_error(
				format!("Failed to deserialize block: {}", e),
				Some(Box::new(e)),
				metadata.clone(),
			)
		})?;

		block.transactions_for(address).map_err(|e| {
			BlockChainError::decode_error(
				format!("Failed to decode transactions: {}", e),
				None,
				metadata,
			)
		})
	}

	#[instrument(skip(self))]
	async fn balance(&self, address: &str) -> Result<U256, BlockChainError> {
		ensure_valid_address(address)?;

		let method = "eth_getBalance";
		let response = self
			.http_client
			.send_raw_request(method, Some(json!([address, "latest"])))
			.await
			.map_err(|e| {
				BlockChainError::from_transport(
					"Failed to get balance",
					e,
					single("address", address),
				)
			})?;

		let result = take_result(response, method)?;
		parse_hex_u256(hex_result(&result, method)?).map_err(|e| {
			BlockChainError::decode_error(
				format!("Failed to parse balance: {}", e),
				None,
				single("address", address),
			)
		})
	}
}
