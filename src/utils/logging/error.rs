//! Error context shared by every error enum in the crate.
//!
//! Each error variant wraps an [`ErrorContext`] carrying a message, an optional source,
//! key/value metadata, a creation timestamp and a trace id. Trace ids are inherited
//! from the source chain when one is present, so a failure can be followed from the
//! transport up to the polling engine in the logs.

use chrono::Utc;
use std::{collections::HashMap, error::Error, fmt};
use uuid::Uuid;

type BoxedSource = Box<dyn Error + Send + Sync + 'static>;

const MAX_SOURCE_DEPTH: usize = 3;

#[derive(Debug)]
pub struct ErrorContext {
	pub message: String,
	pub source: Option<BoxedSource>,
	pub metadata: Option<HashMap<String, String>>,
	/// RFC 3339 creation time.
	pub timestamp: String,
	/// UUID v4, inherited from the source chain when available.
	pub trace_id: String,
}

impl ErrorContext {
	pub fn new(
		message: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		let trace_id = match &source {
			Some(src) => TraceableError::trace_id(src.as_ref()),
			None => Uuid::new_v4().to_string(),
		};

		Self {
			message: message.into(),
			source,
			metadata,
			timestamp: Utc::now().to_rfc3339(),
			trace_id,
		}
	}

	/// Same as [`ErrorContext::new`], additionally emitting an `error` event.
	pub fn new_with_log(
		message: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		let context = Self::new(message, source, metadata);
		log_error(&context);
		context
	}

	pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.metadata
			.get_or_insert_with(HashMap::new)
			.insert(key.into(), value.into());
		self
	}

	/// `"message [a=1, b=2]"` with keys sorted.
	pub fn format_with_metadata(&self) -> String {
		let Some(metadata) = self.metadata.as_ref().filter(|m| !m.is_empty()) else {
			return self.message.clone();
		};

		let mut pairs: Vec<_> = metadata.iter().collect();
		pairs.sort_by(|a, b| a.0.cmp(b.0));
		let rendered: Vec<String> = pairs
			.into_iter()
			.map(|(key, value)| format!("{}={}", key, value))
			.collect();

		format!("{} [{}]", self.message, rendered.join(", "))
	}
}

impl fmt::Display for ErrorContext {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.format_with_metadata())
	}
}

impl Error for ErrorContext {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		self.source.as_deref().map(|e| e as &(dyn Error + 'static))
	}
}

/// Errors that can report the trace id of the failure they describe.
pub trait TraceableError: Error + Send + Sync {
	fn trace_id(&self) -> String;
}

impl TraceableError for dyn Error + Send + Sync + 'static {
	fn trace_id(&self) -> String {
		if let Some(id) = extract_trace_id(self) {
			return id;
		}

		let mut source = self.source();
		let mut depth = 0;
		while let Some(err) = source {
			depth += 1;
			if depth > MAX_SOURCE_DEPTH {
				break;
			}
			if let Some(id) = extract_trace_id(err) {
				return id;
			}
			source = err.source();
		}

		Uuid::new_v4().to_string()
	}
}

fn extract_trace_id(err: &(dyn Error + 'static)) -> Option<String> {
	if let Some(ctx) = err.downcast_ref::<ErrorContext>() {
		return Some(ctx.trace_id.clone());
	}

	macro_rules! try_downcast {
		($($ty:path),*) => {
			$(
				if let Some(e) = err.downcast_ref::<$ty>() {
					return Some(e.trace_id());
				}
			)*
		}
	}

	try_downcast!(
		crate::services::blockchain::TransportError,
		crate::services::blockchain::BlockChainError,
		crate::services::blockwatcher::BlockWatcherError,
		crate::services::notification::NotificationError,
		crate::models::ConfigError
	);

	None
}

/// Drops everything from the first HTML tag on, so proxy error pages stay out of the logs.
fn sanitize_error_message(message: &str) -> String {
	if ["<html>", "<head>", "<body>"]
		.iter()
		.any(|tag| message.contains(tag))
	{
		if let Some(pos) = message.find('<') {
			return message[..pos].trim().to_string();
		}
	}
	message.to_string()
}

fn format_error_chain(err: &dyn Error) -> String {
	let mut chain = sanitize_error_message(&err.to_string());
	let mut source = err.source();
	while let Some(err) = source {
		chain.push_str("\n\tCaused by: ");
		chain.push_str(&sanitize_error_message(&err.to_string()));
		source = err.source();
	}
	chain
}

fn log_error(error: &ErrorContext) {
	match &error.source {
		Some(source) => tracing::error!(
			message = error.format_with_metadata(),
			trace_id = %error.trace_id,
			timestamp = %error.timestamp,
			error.chain = %format_error_chain(source.as_ref()),
			"Error occurred"
		),
		None => tracing::error!(
			message = error.format_with_metadata(),
			trace_id = %error.trace_id,
			timestamp = %error.timestamp,
			"Error occurred"
		),
	}
}
