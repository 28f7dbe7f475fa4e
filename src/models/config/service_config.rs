//! Service configuration: file, then environment, then command line.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, path::Path, time::Duration};

use crate::{
	models::{ConfigError, ConfigLoader},
	utils::{parse_http_url, RetryConfig, RetryPolicy},
};

pub const DEFAULT_CONFIG_PATH: &str = "config/config.json";

const DEFAULT_RPC_URL: &str = "https://ethereum-rpc.publicnode.com";
const WEBHOOK_METHODS: [&str; 5] = ["GET", "POST", "PUT", "PATCH", "DELETE"];

/// Outbound webhook receiving one call per matched transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookConfig {
	pub url: String,
	/// Defaults to `POST`.
	#[serde(default)]
	pub method: Option<String>,
	/// Enables HMAC-SHA256 signing of the payload when set.
	#[serde(default)]
	pub secret: Option<String>,
	#[serde(default)]
	pub headers: Option<HashMap<String, String>>,
}

impl WebhookConfig {
	pub fn new(url: impl Into<String>) -> Self {
		Self {
			url: url.into(),
			method: None,
			secret: None,
			headers: None,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PollerConfig {
	/// Period between two polling cycles.
	pub interval_ms: u64,
	/// Soft deadline for a cycle; only limits retries, never in-flight requests.
	pub cycle_timeout_ms: u64,
	/// Attempts per address lookup.
	pub retry: RetryPolicy,
	/// Address lookups run concurrently within one block.
	pub max_concurrent_lookups: usize,
}

impl Default for PollerConfig {
	fn default() -> Self {
		Self {
			interval_ms: 15_000,
			cycle_timeout_ms: 10_000,
			retry: RetryPolicy::default(),
			max_concurrent_lookups: 1,
		}
	}
}

impl PollerConfig {
	pub fn interval(&self) -> Duration {
		Duration::from_millis(self.interval_ms)
	}

	pub fn cycle_timeout(&self) -> Duration {
		Duration::from_millis(self.cycle_timeout_ms)
	}
}

/// Public HTTP API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
	pub enabled: bool,
	pub host: String,
	pub port: u16,
}

impl Default for ApiConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			host: "0.0.0.0".to_string(),
			port: 8060,
		}
	}
}

impl ApiConfig {
	pub fn bind_address(&self) -> String {
		format!("{}:{}", self.host, self.port)
	}
}

/// Prometheus scrape endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetricsConfig {
	pub enabled: bool,
	pub host: String,
	pub port: u16,
}

impl Default for MetricsConfig {
	fn default() -> Self {
		Self {
			enabled: false,
			host: "0.0.0.0".to_string(),
			port: 8081,
		}
	}
}

impl MetricsConfig {
	pub fn bind_address(&self) -> String {
		format!("{}:{}", self.host, self.port)
	}
}

/// Top-level configuration of the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
	pub rpc_url: String,
	/// Middleware retries inside a single RPC request.
	pub rpc_retry: RetryConfig,
	/// Matches are stored but not delivered when unset.
	pub webhook: Option<WebhookConfig>,
	pub poller: PollerConfig,
	pub api: ApiConfig,
	pub metrics: MetricsConfig,
	/// Subscribed at startup.
	pub watch_addresses: Vec<String>,
}

impl Default for ServiceConfig {
	fn default() -> Self {
		Self {
			rpc_url: DEFAULT_RPC_URL.to_string(),
			rpc_retry: RetryConfig::default(),
			webhook: None,
			poller: PollerConfig::default(),
			api: ApiConfig::default(),
			metrics: MetricsConfig::default(),
			watch_addresses: Vec::new(),
		}
	}
}

fn path_metadata(path: &Path) -> Option<HashMap<String, String>> {
	Some(HashMap::from([(
		"path".to_string(),
		path.display().to_string(),
	)]))
}

impl ServiceConfig {
	/// Parses the file at `path` without validating it.
	pub fn read_file(path: &Path) -> Result<Self, ConfigError> {
		if !Self::is_json_file(path) {
			return Err(ConfigError::file_error(
				"configuration file must be a .json file",
				None,
				path_metadata(path),
			));
		}

		let file = std::fs::File::open(path).map_err(|e| {
			ConfigError::file_error(
				format!("failed to open config file: {}", e),
				Some(Box::new(e)),
				path_metadata(path),
			)
		})?;

		serde_json::from_reader(file).map_err(|e| {
			ConfigError::parse_error(
				format!("failed to parse config file: {}", e),
				Some(Box::new(e)),
				path_metadata(path),
			)
		})
	}

	/// Loads `path`, or [`DEFAULT_CONFIG_PATH`] when it exists, or the defaults,
	/// then applies environment overrides. The result is not validated yet so that
	/// command-line overrides can still be applied.
	pub fn resolve<F>(path: Option<&Path>, lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let default_path = Path::new(DEFAULT_CONFIG_PATH);
		let mut config = match path {
			Some(path) => Self::read_file(path)?,
			None if default_path.exists() => Self::read_file(default_path)?,
			None => Self::default(),
		};
		config.apply_env_overrides(lookup)?;
		Ok(config)
	}

	/// Applies `ETHEREUM_RPC_URL`, `WEBHOOK_URL` and `HTTP_PORT` as read through `lookup`.
	pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		if let Some(url) = lookup("ETHEREUM_RPC_URL").filter(|v| !v.is_empty()) {
			self.rpc_url = url;
		}

		if let Some(url) = lookup("WEBHOOK_URL").filter(|v| !v.is_empty()) {
			self.set_webhook_url(url);
		}

		if let Some(port) = lookup("HTTP_PORT").filter(|v| !v.is_empty()) {
			self.api.port = port.parse().map_err(|e| {
				ConfigError::parse_error(
					format!("HTTP_PORT is not a valid port: {}", port),
					Some(Box::new(e)),
					Some(HashMap::from([(
						"var".to_string(),
						"HTTP_PORT".to_string(),
					)])),
				)
			})?;
		}

		Ok(())
	}

	/// Replaces the webhook URL, keeping any configured method, secret and headers.
	pub fn set_webhook_url(&mut self, url: impl Into<String>) {
		match self.webhook.as_mut() {
			Some(webhook) => webhook.url = url.into(),
			None => self.webhook = Some(WebhookConfig::new(url)),
		}
	}
}

#[async_trait]
impl ConfigLoader for ServiceConfig {
	async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
		let config = Self::read_file(path)?;
		config.validate()?;
		Ok(config)
	}

	fn validate(&self) -> Result<(), ConfigError> {
		parse_http_url(&self.rpc_url).map_err(|e| {
			ConfigError::validation_error(format!("Invalid rpc_url: {}", e), None, None)
		})?;

		if let Some(webhook) = &self.webhook {
			parse_http_url(&webhook.url).map_err(|e| {
				ConfigError::validation_error(format!("Invalid webhook url: {}", e), None, None)
			})?;

			if let Some(method) = &webhook.method {
				if !WEBHOOK_METHODS.contains(&method.to_uppercase().as_str()) {
					return Err(ConfigError::validation_error(
						format!("Invalid webhook method: {}", method),
						None,
						None,
					));
				}
			}
		}

		if self.poller.interval_ms == 0 {
			return Err(ConfigError::validation_error(
				"poller.interval_ms must be greater than 0",
				None,
				None,
			));
		}

		if self.poller.cycle_timeout_ms == 0 {
			return Err(ConfigError::validation_error(
				"poller.cycle_timeout_ms must be greater than 0",
				None,
				None,
			));
		}

		if self.poller.retry.max_attempts == 0 {
			return Err(ConfigError::validation_error(
				"poller.retry.max_attempts must be at least 1",
				None,
				None,
			));
		}

		if self.poller.max_concurrent_lookups == 0 {
			return Err(ConfigError::validation_error(
				"poller.max_concurrent_lookups must be at least 1",
				None,
				None,
			));
		}

		if self.watch_addresses.iter().any(|a| a.trim().is_empty()) {
			return Err(ConfigError::validation_error(
				"watch_addresses must not contain empty entries",
				None,
				None,
			));
		}

		Ok(())
	}
}
