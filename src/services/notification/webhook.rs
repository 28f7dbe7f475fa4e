//! Webhook delivery of matched transactions.
//!
//! Each match is sent as one JSON request. When a secret is configured the payload is
//! signed with HMAC-SHA256 over `payload || timestamp`, and the signature and
//! timestamp are sent in the `X-Signature` and `X-Timestamp` headers.

use async_trait::async_trait;
use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::{
	header::{HeaderMap, HeaderName, HeaderValue},
	Method,
};
use reqwest_middleware::ClientWithMiddleware;
use sha2::Sha256;
use std::{collections::HashMap, sync::Arc};

use crate::{
	models::{Transaction, WebhookConfig},
	services::notification::{build_payload, NotificationError, TransactionNotifier},
};

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug)]
pub struct WebhookNotifier {
	client: Arc<ClientWithMiddleware>,
	method: Method,
	secret: Option<String>,
	headers: HeaderMap,
}

impl WebhookNotifier {
	/// Validates the method, secret and headers of `config` up front.
	///
	/// The URL of `config` is not used here; the sink is given on every call.
	pub fn new(
		config: &WebhookConfig,
		client: Arc<ClientWithMiddleware>,
	) -> Result<Self, NotificationError> {
		let method = match &config.method {
			Some(method) => Method::from_bytes(method.to_uppercase().as_bytes()).map_err(|e| {
				NotificationError::config_error(
					format!("Invalid webhook method: {}", method),
					Some(Box::new(e)),
					None,
				)
			})?,
			None => Method::POST,
		};

		if matches!(&config.secret, Some(secret) if secret.is_empty()) {
			return Err(NotificationError::config_error(
				"Invalid secret: cannot be empty.",
				None,
				None,
			));
		}

		let mut headers = HeaderMap::new();
		headers.insert(
			reqwest::header::CONTENT_TYPE,
			HeaderValue::from_static("application/json"),
		);
		for (key, value) in config.headers.iter().flatten() {
			let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
				NotificationError::config_error(
					format!("Invalid header name: {}", key),
					Some(Box::new(e)),
					None,
				)
			})?;
			let value = HeaderValue::from_str(value).map_err(|e| {
				NotificationError::config_error(
					format!("Invalid header value for {}", key),
					Some(Box::new(e)),
					None,
				)
			})?;
			headers.insert(name, value);
		}

		Ok(Self {
			client,
			method,
			secret: config.secret.clone(),
			headers,
		})
	}

	/// Returns `(hex signature, timestamp in ms)` for `body`.
	pub fn sign_payload(&self, secret: &str, body: &str) -> Result<(String, String), NotificationError> {
		let timestamp = Utc::now().timestamp_millis().to_string();

		let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).map_err(|e| {
			NotificationError::config_error(format!("Invalid secret: {}", e), None, None)
		})?;
		mac.update(body.as_bytes());
		mac.update(timestamp.as_bytes());

		Ok((hex::encode(mac.finalize().into_bytes()), timestamp))
	}

	fn signature_headers(&self, body: &str) -> Result<HeaderMap, NotificationError> {
		let mut headers = HeaderMap::new();
		let Some(secret) = &self.secret else {
			return Ok(headers);
		};

		let (signature, timestamp) = self.sign_payload(secret, body)?;
		for (name, value) in [("x-signature", signature), ("x-timestamp", timestamp)] {
			let value = HeaderValue::from_str(&value).map_err(|e| {
				NotificationError::internal_error(
					format!("Invalid {} header value", name),
					Some(Box::new(e)),
					None,
				)
			})?;
			headers.insert(HeaderName::from_static(name), value);
		}
		Ok(headers)
	}
}

#[async_trait]
impl TransactionNotifier for WebhookNotifier {
	async fn notify(
		&self,
		transaction: &Transaction,
		address: &str,
		sink_url: &str,
	) -> Result<(), NotificationError> {
		let metadata = Some(HashMap::from([
			("url".to_string(), sink_url.to_string()),
			("transaction".to_string(), transaction.hash().to_string()),
		]));

		let payload = build_payload(transaction, address)?;
		let body = serde_json::to_string(&payload).map_err(|e| {
			NotificationError::internal_error(
				format!("Failed to serialize payload: {}", e),
				Some(Box::new(e)),
				metadata.clone(),
			)
		})?;

		let mut headers = self.headers.clone();
		headers.extend(self.signature_headers(&body)?);

		let response = self
			.client
			.request(self.method.clone(), sink_url)
			.headers(headers)
			.body(body)
			.send()
			.await
			.map_err(|e| {
				NotificationError::delivery_error(
					format!("Failed to send webhook request: {}", e),
					Some(Box::new(e)),
					metadata.clone(),
				)
			})?;

		let status = response.status();
		if !status.is_success() {
			return Err(NotificationError::delivery_error(
				format!("Webhook request failed with status: {}", status),
				None,
				metadata,
			));
		}

		tracing::debug!(url = sink_url, transaction = transaction.hash(), "Webhook delivered");
		Ok(())
	}
}
