//! Error types for the JSON-RPC transport.

use crate::utils::logging::error::{ErrorContext, TraceableError};
use std::collections::HashMap;
use thiserror::Error;

type BoxedSource = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum TransportError {
	/// Non-success HTTP status from the node.
	#[error("HTTP error: status {status_code} for URL {url}")]
	Http {
		status_code: reqwest::StatusCode,
		url: String,
		body: String,
		context: ErrorContext,
	},

	/// The request never produced a response.
	#[error("Network error: {0}")]
	Network(ErrorContext),

	/// The response body was not valid JSON-RPC.
	#[error("Failed to parse JSON response: {0}")]
	ResponseParse(ErrorContext),

	#[error("Failed to serialize request JSON: {0}")]
	RequestSerialization(ErrorContext),

	/// The node answered with a JSON-RPC `error` object.
	#[error("RPC error {code}: {message}")]
	Rpc {
		code: i64,
		message: String,
		context: ErrorContext,
	},
}

impl TransportError {
	pub fn http(
		status_code: reqwest::StatusCode,
		url: String,
		body: String,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		let msg = format!("HTTP error: status {} for URL {}", status_code, url);

		Self::Http {
			status_code,
			url,
			body,
			context: ErrorContext::new_with_log(msg, source, metadata),
		}
	}

	pub fn network(
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::Network(ErrorContext::new_with_log(msg, source, metadata))
	}

	pub fn response_parse(
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::ResponseParse(ErrorContext::new_with_log(msg, source, metadata))
	}

	pub fn request_serialization(
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::RequestSerialization(ErrorContext::new_with_log(msg, source, metadata))
	}

	pub fn rpc(code: i64, message: impl Into<String>, metadata: Option<HashMap<String, String>>) -> Self {
		let message = message.into();
		let context =
			ErrorContext::new_with_log(format!("RPC error {}: {}", code, message), None, metadata);
		Self::Rpc {
			code,
			message,
			context,
		}
	}

	fn context(&self) -> &ErrorContext {
		match self {
			Self::Http { context, .. } | Self::Rpc { context, .. } => context,
			Self::Network(ctx) | Self::ResponseParse(ctx) | Self::RequestSerialization(ctx) => ctx,
		}
	}
}

impl TraceableError for TransportError {
	fn trace_id(&self) -> String {
		self.context().trace_id.clone()
	}
}
