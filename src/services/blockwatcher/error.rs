//! Polling engine error types.

use crate::utils::logging::error::{ErrorContext, TraceableError};
use std::collections::HashMap;
use thiserror::Error as ThisError;

type BoxedSource = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(ThisError, Debug)]
pub enum BlockWatcherError {
	/// The current height could not be read; the cycle was skipped.
	#[error("Network error: {0}")]
	NetworkError(ErrorContext),

	/// The periodic task could not be driven or joined.
	#[error("Scheduler error: {0}")]
	SchedulerError(ErrorContext),
}

impl BlockWatcherError {
	pub fn network_error(
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::NetworkError(ErrorContext::new_with_log(msg, source, metadata))
	}

	pub fn scheduler_error(
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::SchedulerError(ErrorContext::new_with_log(msg, source, metadata))
	}
}

impl TraceableError for BlockWatcherError {
	fn trace_id(&self) -> String {
		match self {
			Self::NetworkError(ctx) | Self::SchedulerError(ctx) => ctx.trace_id.clone(),
		}
	}
}
