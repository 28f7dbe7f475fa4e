//! Notification error types.

use crate::utils::logging::error::{ErrorContext, TraceableError};
use std::collections::HashMap;
use thiserror::Error as ThisError;

type BoxedSource = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(ThisError, Debug)]
pub enum NotificationError {
	/// The notifier is misconfigured (bad secret, header or method).
	#[error("Notification configuration error: {0}")]
	ConfigError(ErrorContext),

	/// The sink could not be reached or did not answer with a success status.
	#[error("Delivery error: {0}")]
	DeliveryError(ErrorContext),

	#[error("Internal error: {0}")]
	InternalError(ErrorContext),
}

impl NotificationError {
	pub fn config_error(
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::ConfigError(ErrorContext::new_with_log(msg, source, metadata))
	}

	pub fn delivery_error(
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::DeliveryError(ErrorContext::new_with_log(msg, source, metadata))
	}

	pub fn internal_error(
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::InternalError(ErrorContext::new_with_log(msg, source, metadata))
	}
}

impl TraceableError for NotificationError {
	fn trace_id(&self) -> String {
		match self {
			Self::ConfigError(ctx) | Self::DeliveryError(ctx) | Self::InternalError(ctx) => {
				ctx.trace_id.clone()
			}
		}
	}
}
