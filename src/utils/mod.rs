//! Utilities shared across the service.
//!
//! - http: retryable HTTP client construction
//! - logging: tracing setup and the error context used by every error type
//! - metrics: Prometheus registry and scrape endpoint
//! - parsing: size, URL and hex quantity parsing
//! - retry: attempt-bounded retry policy
//! - tests: builders and helpers for tests

mod http;
mod parsing;
mod retry;

pub mod logging;
pub mod metrics;
pub mod tests;

pub use http::{create_retryable_http_client, JitterSetting, RetryConfig};
pub use parsing::{parse_hex_u256, parse_hex_u64, parse_http_url, parse_string_to_bytes_size};
pub use retry::{BackoffStrategy, RetryPolicy};
