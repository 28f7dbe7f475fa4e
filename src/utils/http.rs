//! HTTP client construction shared by the RPC transport and the webhook notifier.

use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{
	policies::ExponentialBackoff, Jitter, RetryTransientMiddleware, RetryableStrategy,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_max_retries() -> u32 {
	0
}

fn default_base_for_backoff() -> u32 {
	2
}

fn default_initial_backoff_ms() -> u64 {
	250
}

fn default_max_backoff_ms() -> u64 {
	10_000
}

/// Jitter applied by the HTTP retry middleware.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum JitterSetting {
	None,
	#[default]
	Full,
}

/// Transport-level retry settings for an HTTP client.
///
/// Retries here happen inside a single logical request and are invisible to callers.
/// The default is no middleware retries at all, so the polling engine's
/// [`RetryPolicy`](crate::utils::RetryPolicy) stays the only retry budget.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(deny_unknown_fields)]
pub struct RetryConfig {
	#[serde(default = "default_max_retries")]
	pub max_retries: u32,
	#[serde(default = "default_base_for_backoff")]
	pub base_for_backoff: u32,
	#[serde(default = "default_initial_backoff_ms")]
	pub initial_backoff_ms: u64,
	#[serde(default = "default_max_backoff_ms")]
	pub max_backoff_ms: u64,
	#[serde(default)]
	pub jitter: JitterSetting,
}

impl Default for RetryConfig {
	fn default() -> Self {
		Self {
			max_retries: default_max_retries(),
			base_for_backoff: default_base_for_backoff(),
			initial_backoff_ms: default_initial_backoff_ms(),
			max_backoff_ms: default_max_backoff_ms(),
			jitter: JitterSetting::default(),
		}
	}
}

impl RetryConfig {
	/// A configuration that never retries, used for best-effort deliveries.
	pub fn no_retries() -> Self {
		Self {
			max_retries: 0,
			..Self::default()
		}
	}
}

/// Wraps `base_client` in a retry middleware configured from `config`.
///
/// When `custom_strategy` is given it decides which responses count as transient;
/// otherwise the middleware's default classification is used.
pub fn create_retryable_http_client<S>(
	config: &RetryConfig,
	base_client: reqwest::Client,
	custom_strategy: Option<S>,
) -> ClientWithMiddleware
where
	S: RetryableStrategy + Send + Sync + 'static,
{
	let jitter = match config.jitter {
		JitterSetting::None => Jitter::None,
		JitterSetting::Full => Jitter::Full,
	};

	let min_backoff = Duration::from_millis(config.initial_backoff_ms);
	let max_backoff = Duration::from_millis(config.max_backoff_ms.max(config.initial_backoff_ms));

	let retry_policy = ExponentialBackoff::builder()
		.jitter(jitter)
		.base(config.base_for_backoff)
		.retry_bounds(min_backoff, max_backoff)
		.build_with_max_retries(config.max_retries);

	let builder = ClientBuilder::new(base_client);
	match custom_strategy {
		Some(strategy) => builder.with(RetryTransientMiddleware::new_with_policy_and_strategy(
			retry_policy,
			strategy,
		)),
		None => builder.with(RetryTransientMiddleware::new_with_policy(retry_policy)),
	}
	.build()
}
