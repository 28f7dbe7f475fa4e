//! Chain client error types.

use crate::{
	services::blockchain::TransportError,
	utils::logging::error::{ErrorContext, TraceableError},
};
use std::collections::HashMap;
use thiserror::Error as ThisError;

type BoxedSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failures of a chain client call.
#[derive(ThisError, Debug)]
pub enum BlockChainError {
	/// The address is not syntactically valid. Never retried.
	#[error("Invalid address: {0}")]
	InvalidAddress(ErrorContext),

	/// The node could not be reached or answered with an error.
	#[error("Transport error: {0}")]
	TransportError(ErrorContext),

	/// The node answered with a payload that could not be decoded.
	#[error("Decode error: {0}")]
	DecodeError(ErrorContext),

	#[error("Internal error: {0}")]
	InternalError(ErrorContext),
}

impl BlockChainError {
	pub fn invalid_address(
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::InvalidAddress(ErrorContext::new_with_log(msg, source, metadata))
	}

	pub fn transport_error(
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::TransportError(ErrorContext::new_with_log(msg, source, metadata))
	}

	pub fn decode_error(
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::DecodeError(ErrorContext::new_with_log(msg, source, metadata))
	}

	pub fn internal_error(
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::InternalError(ErrorContext::new_with_log(msg, source, metadata))
	}

	/// Decode failures are retried like transport failures.
	pub fn is_retryable(&self) -> bool {
		!matches!(self, Self::InvalidAddress(_))
	}

	/// Wraps a transport failure, classifying unparseable responses as decode errors.
	pub fn from_transport(
		msg: impl Into<String>,
		err: TransportError,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		match err {
			TransportError::ResponseParse(_) => Self::decode_error(msg, Some(Box::new(err)), metadata),
			_ => Self::transport_error(msg, Some(Box::new(err)), metadata),
		}
	}
}

impl TraceableError for BlockChainError {
	fn trace_id(&self) -> String {
		match self {
			Self::InvalidAddress(ctx)
			| Self::TransportError(ctx)
			| Self::DecodeError(ctx)
			| Self::InternalError(ctx) => ctx.trace_id.clone(),
		}
	}
}
