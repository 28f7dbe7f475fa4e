//! Configuration loading and validation.

#![allow(clippy::result_large_err)]

use async_trait::async_trait;
use std::path::Path;

mod error;
mod service_config;

pub use error::ConfigError;
pub use service_config::{
	ApiConfig, MetricsConfig, PollerConfig, ServiceConfig, WebhookConfig, DEFAULT_CONFIG_PATH,
};

/// Common interface for configuration files.
#[async_trait]
pub trait ConfigLoader: Sized {
	/// Reads, parses and validates the file at `path`.
	async fn load_from_path(path: &Path) -> Result<Self, ConfigError>;

	fn validate(&self) -> Result<(), ConfigError>;

	fn is_json_file(path: &Path) -> bool {
		path.extension()
			.map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("json"))
			.unwrap_or(false)
	}
}
