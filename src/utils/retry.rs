//! Attempt-bounded retry policy used around chain lookups.
//!
//! The policy is a plain value (attempt budget plus backoff shape) so call sites can
//! swap the backoff without changing their control flow. Delays are produced with
//! `backon` builders and the loop itself is driven by [`backon::Retryable`].

use backon::{BackoffBuilder, ConstantBuilder, ExponentialBuilder, Retryable};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, future::Future, time::Duration};
use tokio::time::Instant;

fn default_max_attempts() -> u32 {
	3
}

/// Delay inserted between two attempts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BackoffStrategy {
	/// Retry immediately.
	#[default]
	None,
	/// Wait the same delay before every retry.
	Fixed { delay_ms: u64 },
	/// Double the delay after every retry, capped at `max_ms`.
	Exponential {
		initial_ms: u64,
		max_ms: u64,
		#[serde(default)]
		jitter: bool,
	},
}

/// How many times an operation is attempted and how long to wait in between.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetryPolicy {
	/// Total attempts, including the first one.
	#[serde(default = "default_max_attempts")]
	pub max_attempts: u32,
	#[serde(default)]
	pub backoff: BackoffStrategy,
}

impl Default for RetryPolicy {
	fn default() -> Self {
		Self {
			max_attempts: default_max_attempts(),
			backoff: BackoffStrategy::None,
		}
	}
}

impl RetryPolicy {
	pub fn new(max_attempts: u32, backoff: BackoffStrategy) -> Self {
		Self {
			max_attempts,
			backoff,
		}
	}

	/// Number of retries after the first attempt.
	pub fn max_retries(&self) -> usize {
		self.max_attempts.saturating_sub(1) as usize
	}

	/// The sequence of delays slept before each retry.
	///
	/// Yields exactly [`max_retries`](Self::max_retries) items.
	pub fn delays(&self) -> Box<dyn Iterator<Item = Duration> + Send + Sync> {
		let retries = self.max_retries();
		match &self.backoff {
			BackoffStrategy::None => Box::new(
				ConstantBuilder::default()
					.with_delay(Duration::ZERO)
					.with_max_times(retries)
					.build(),
			),
			BackoffStrategy::Fixed { delay_ms } => Box::new(
				ConstantBuilder::default()
					.with_delay(Duration::from_millis(*delay_ms))
					.with_max_times(retries)
					.build(),
			),
			BackoffStrategy::Exponential {
				initial_ms,
				max_ms,
				jitter,
			} => {
				let builder = ExponentialBuilder::default()
					.with_min_delay(Duration::from_millis(*initial_ms))
					.with_max_delay(Duration::from_millis((*max_ms).max(*initial_ms)))
					.with_max_times(retries);
				if *jitter {
					Box::new(builder.with_jitter().build())
				} else {
					Box::new(builder.build())
				}
			}
		}
	}

	/// Runs `operation` until it succeeds, the attempt budget is spent, `should_retry`
	/// rejects the error or `deadline` has passed.
	///
	/// The first attempt always runs. The deadline is only consulted between attempts,
	/// an attempt already in flight is never interrupted.
	pub async fn execute<T, E, F, Fut, R>(
		&self,
		operation: F,
		mut should_retry: R,
		deadline: Option<Instant>,
	) -> Result<T, E>
	where
		F: FnMut() -> Fut,
		Fut: Future<Output = Result<T, E>>,
		R: FnMut(&E) -> bool,
		E: Display,
	{
		operation
			.retry(self.delays())
			.when(move |err: &E| {
				should_retry(err) && deadline.is_none_or(|deadline| Instant::now() < deadline)
			})
			.notify(|err: &E, delay: Duration| {
				tracing::warn!(error = %err, delay_ms = delay.as_millis() as u64, "Attempt failed, retrying");
			})
			.await
	}
}
