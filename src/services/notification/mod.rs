//! Delivery of matched transactions to an external sink.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::models::Transaction;

mod error;
mod webhook;

pub use error::NotificationError;
pub use webhook::WebhookNotifier;

/// Literal carried in the `notification` field of every payload.
pub const NEW_TRANSACTION_MESSAGE: &str = "New transaction detected";

/// Delivers one matched transaction to a sink.
///
/// A call performs a single delivery attempt; failures are reported, never retried.
#[async_trait]
pub trait TransactionNotifier: Send + Sync {
	async fn notify(
		&self,
		transaction: &Transaction,
		address: &str,
		sink_url: &str,
	) -> Result<(), NotificationError>;
}

/// `{"address", "transaction", "notification"}` body sent for a match.
pub fn build_payload(transaction: &Transaction, address: &str) -> Result<Value, NotificationError> {
	let transaction = serde_json::to_value(transaction).map_err(|e| {
		NotificationError::internal_error(
			format!("Failed to serialize transaction: {}", e),
			Some(Box::new(e)),
			None,
		)
	})?;

	Ok(json!({
		"address": address,
		"transaction": transaction,
		"notification": NEW_TRANSACTION_MESSAGE,
	}))
}
