//! HTTP JSON-RPC transport bound to a single node URL.

use anyhow::Context;
use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use serde::Serialize;
use serde_json::{json, Value};
use std::{
	collections::HashMap,
	sync::{
		atomic::{AtomicU64, Ordering},
		Arc,
	},
	time::Duration,
};
use url::Url;

use crate::{
	services::blockchain::transports::{
		BlockchainTransport, TransientErrorRetryStrategy, TransportError,
	},
	utils::{create_retryable_http_client, parse_http_url, RetryConfig},
};

#[derive(Clone, Debug)]
pub struct HttpTransportClient {
	client: ClientWithMiddleware,
	url: Url,
	next_id: Arc<AtomicU64>,
}

impl HttpTransportClient {
	/// Creates a transport for `rpc_url`. No request is sent until first use.
	pub fn new(rpc_url: &str, retry_config: &RetryConfig) -> Result<Self, anyhow::Error> {
		let url = parse_http_url(rpc_url).map_err(anyhow::Error::msg)?;

		let base_client = reqwest::ClientBuilder::new()
			.pool_idle_timeout(Duration::from_secs(90))
			.pool_max_idle_per_host(32)
			.timeout(Duration::from_secs(30))
			.connect_timeout(Duration::from_secs(20))
			.build()
			.context("Failed to create base HTTP client")?;

		let client =
			create_retryable_http_client(retry_config, base_client, Some(TransientErrorRetryStrategy));

		Ok(Self {
			client,
			url,
			next_id: Arc::new(AtomicU64::new(1)),
		})
	}

	/// Checks that the node answers a `net_version` request.
	pub async fn try_connect(&self) -> Result<(), TransportError> {
		self.send_raw_request::<Value>("net_version", None)
			.await
			.map(|_| ())
	}

	fn metadata(&self, method: &str) -> Option<HashMap<String, String>> {
		Some(HashMap::from([
			("url".to_string(), self.url.to_string()),
			("method".to_string(), method.to_string()),
		]))
	}
}

#[async_trait]
impl BlockchainTransport for HttpTransportClient {
	async fn get_current_url(&self) -> String {
		self.url.to_string()
	}

	async fn send_raw_request<P>(
		&self,
		method: &str,
		params: Option<P>,
	) -> Result<Value, TransportError>
	where
		P: Into<Value> + Send + Clone + Serialize,
	{
		let request = self.customize_request(method, params).await;
		let body = serde_json::to_vec(&request).map_err(|e| {
			TransportError::request_serialization(
				format!("Failed to serialize {} request", method),
				Some(Box::new(e)),
				self.metadata(method),
			)
		})?;

		tracing::debug!(method, url = %self.url, "Sending RPC request");

		let response = self
			.client
			.post(self.url.clone())
			.header(reqwest::header::CONTENT_TYPE, "application/json")
			.body(body)
			.send()
			.await
			.map_err(|e| {
				TransportError::network(
					format!("Failed to send {} request", method),
					Some(Box::new(e)),
					self.metadata(method),
				)
			})?;

		let status = response.status();
		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			return Err(TransportError::http(
				status,
				self.url.to_string(),
				body,
				None,
				self.metadata(method),
			));
		}

		let value: Value = response.json().await.map_err(|e| {
			TransportError::response_parse(
				format!("Failed to parse {} response", method),
				Some(Box::new(e)),
				self.metadata(method),
			)
		})?;

		if let Some(error) = value.get("error").filter(|error| !error.is_null()) {
			let code = error.get("code").and_then(Value::as_i64).unwrap_or_default();
			let message = error
				.get("message")
				.and_then(Value::as_str)
				.unwrap_or("unknown error");
			return Err(TransportError::rpc(code, message, self.metadata(method)));
		}

		Ok(value)
	}

	async fn customize_request<P>(&self, method: &str, params: Option<P>) -> Value
	where
		P: Into<Value> + Send + Clone + Serialize,
	{
		json!({
			"jsonrpc": "2.0",
			"id": self.next_id.fetch_add(1, Ordering::Relaxed),
			"method": method,
			"params": params.map(|p| p.into()).unwrap_or_else(|| json!([]))
		})
	}
}
