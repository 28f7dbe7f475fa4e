//! Address monitoring service entry point.
//!
//! This binary loads the configuration, wires the services together, starts the
//! polling engine and the HTTP servers, and handles graceful shutdown on Ctrl+C.
//!
//! # Flow
//! 1. Applies `.env` and command-line options to the environment
//! 2. Sets up logging
//! 3. Loads the configuration (file, environment, command line) and validates it
//! 4. Initializes services and subscribes the configured addresses
//! 5. Starts the polling engine, the API server and optionally the metrics server
//! 6. Stops the engine between cycles and shuts the servers down on Ctrl+C

use address_monitor::{
	api::create_api_server,
	bootstrap::{create_address_monitor, create_block_watcher, initialize_services, Result},
	models::{ConfigLoader, ServiceConfig},
	services::blockchain::BlockchainTransport,
	utils::{
		logging::{setup_logging, LoggingConfig},
		metrics::server::create_metrics_server,
		parse_string_to_bytes_size,
	},
};

use clap::Parser;
use dotenvy::dotenv_override;
use std::{
	env::{set_var, var},
	path::PathBuf,
};
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(
	name = "address-monitor",
	about = "Watches Ethereum addresses for new transactions and forwards every match to a webhook.",
	version
)]
struct Cli {
	/// Path to the JSON configuration file (default: config/config.json)
	#[arg(long, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Ethereum JSON-RPC endpoint
	#[arg(long, value_name = "URL")]
	rpc_url: Option<String>,

	/// Webhook receiving matched transactions
	#[arg(long, value_name = "URL")]
	webhook_url: Option<String>,

	/// Port of the HTTP API
	#[arg(long, value_name = "PORT")]
	port: Option<u16>,

	/// Address to watch from startup; may be repeated
	#[arg(long = "address", value_name = "ADDRESS")]
	addresses: Vec<String>,

	/// Write logs to file instead of stdout
	#[arg(long)]
	log_file: bool,

	/// Set log level (trace, debug, info, warn, error)
	#[arg(long, value_name = "LEVEL")]
	log_level: Option<String>,

	/// Path to store log files (default: logs/)
	#[arg(long, value_name = "PATH")]
	log_path: Option<String>,

	/// Maximum log file size before rolling (e.g., "1GB", "500MB", "1024KB")
	#[arg(long, value_name = "SIZE", value_parser = parse_string_to_bytes_size)]
	log_max_size: Option<u64>,

	/// Enable metrics server
	#[arg(long)]
	metrics: bool,

	/// Address to start the metrics server on (default: 0.0.0.0:8081)
	#[arg(long, value_name = "HOST:PORT")]
	metrics_address: Option<String>,

	/// Validate configuration without starting the service
	#[arg(long)]
	check: bool,
}

impl Cli {
	/// Apply logging options to environment variables, overriding any existing values
	fn apply_to_env(&self) {
		// Reload environment variables from .env file
		dotenv_override().ok();

		if self.log_file {
			set_var("LOG_MODE", "file");
		}

		if let Ok(level) = var("RUST_LOG") {
			set_var("LOG_LEVEL", level);
		}

		if let Some(level) = &self.log_level {
			set_var("LOG_LEVEL", level);
			set_var("RUST_LOG", level);
		}

		if let Some(path) = &self.log_path {
			set_var("LOG_DATA_DIR", path);
		}

		if let Some(max_size) = &self.log_max_size {
			set_var("LOG_MAX_SIZE", max_size.to_string());
		}
	}

	/// Apply service options on top of the file and environment configuration
	fn apply_to_config(&self, config: &mut ServiceConfig) -> Result<()> {
		if let Some(url) = &self.rpc_url {
			config.rpc_url = url.clone();
		}

		if let Some(url) = &self.webhook_url {
			config.set_webhook_url(url.clone());
		}

		if let Some(port) = self.port {
			config.api.port = port;
		}

		config.watch_addresses.extend(self.addresses.iter().cloned());

		if self.metrics {
			config.metrics.enabled = true;
		}

		if let Some(address) = &self.metrics_address {
			let (host, port) = address
				.rsplit_once(':')
				.ok_or_else(|| format!("Invalid metrics address '{}', expected HOST:PORT", address))?;
			config.metrics.host = host.to_string();
			config.metrics.port = port
				.parse()
				.map_err(|e| format!("Invalid metrics port '{}': {}", port, e))?;
		}

		Ok(())
	}
}

/// Main entry point for the address monitoring service.
///
/// # Errors
/// Returns an error if the configuration is invalid, if service initialization fails or
/// if a server cannot bind its address.
#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();

	cli.apply_to_env();

	match LoggingConfig::from_env() {
		Ok(logging) => {
			if let Err(e) = setup_logging(&logging) {
				eprintln!("Failed to setup logging: {}", e);
			}
		}
		Err(e) => eprintln!("Invalid logging configuration: {}", e),
	}

	let mut config = ServiceConfig::resolve(cli.config.as_deref(), |key| var(key).ok())?;
	cli.apply_to_config(&mut config)?;

	if let Err(e) = config.validate() {
		error!("Configuration is invalid: {}", e);
		return Err(e.into());
	}

	if cli.check {
		info!("Configuration is valid");
		return Ok(());
	}

	let services = initialize_services(&config)
		.await
		.map_err(|e| anyhow::anyhow!("Failed to initialize services: {}", e))?;

	let transport = services.client.transport();
	match transport.try_connect().await {
		Ok(()) => info!(url = %transport.get_current_url().await, "Connected to node"),
		Err(e) => warn!(
			url = %transport.get_current_url().await,
			error = %e,
			"Node is not reachable yet, polling will keep retrying"
		),
	}

	if config.webhook.is_none() {
		info!("No webhook configured, matches are stored but not delivered");
	}

	let watcher = create_block_watcher(&services, &config).start();

	let mut server_handles = Vec::new();

	if config.api.enabled {
		let server = create_api_server(&config.api.bind_address(), create_address_monitor(&services))?;
		server_handles.push(server.handle());
		tokio::spawn(async move {
			if let Err(e) = server.await {
				error!("API server error: {}", e);
			}
		});
	} else {
		info!("API server disabled");
	}

	if config.metrics.enabled {
		let server =
			create_metrics_server(&config.metrics.bind_address(), services.subscriptions.clone())?;
		server_handles.push(server.handle());
		tokio::spawn(async move {
			if let Err(e) = server.await {
				error!("Metrics server error: {}", e);
			}
		});
	} else {
		info!("Metrics server disabled. Use --metrics flag to enable");
	}

	info!("Service started. Press Ctrl+C to shutdown");

	if let Err(e) = tokio::signal::ctrl_c().await {
		error!("Error waiting for Ctrl+C: {}", e);
	}
	info!("Shutdown signal received, stopping services...");

	if let Err(e) = watcher.stop().await {
		error!("Error stopping block watcher: {}", e);
	}

	for handle in server_handles {
		handle.stop(true).await;
	}

	info!("Shutdown complete");
	Ok(())
}
