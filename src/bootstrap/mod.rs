//! Wiring of the service graph from a validated [`ServiceConfig`].
//!
//! # Services
//! - `EvmClient`: JSON-RPC chain client bound to `rpc_url`
//! - `SubscriptionRepository` / `TransactionRepository`: shared in-memory state
//! - `WebhookNotifier`: delivery of matches to the configured webhook
//!
//! The polling engine and the API facade are built from the same [`Services`] so that
//! both see one registry and one store.

use reqwest_retry::DefaultRetryableStrategy;
use std::{error::Error, sync::Arc, time::Duration};

use crate::{
	models::{ServiceConfig, WebhookConfig},
	repositories::{SubscriptionRepository, SubscriptionRepositoryTrait, TransactionRepository},
	services::{
		address_monitor::{AddressMonitor, AddressMonitorTrait},
		blockchain::{EvmClient, HttpTransportClient},
		blockwatcher::BlockWatcherService,
		notification::WebhookNotifier,
	},
	utils::{create_retryable_http_client, RetryConfig},
};

/// Type alias for handling ServiceResult
pub type Result<T> = std::result::Result<T, Box<dyn Error>>;

pub type MonitorClient = EvmClient<HttpTransportClient>;

pub type MonitorWatcher = BlockWatcherService<
	MonitorClient,
	SubscriptionRepository,
	TransactionRepository,
	WebhookNotifier,
>;

const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(10);

/// The shared service instances.
#[derive(Clone)]
pub struct Services {
	pub client: Arc<MonitorClient>,
	pub subscriptions: Arc<SubscriptionRepository>,
	pub transactions: Arc<TransactionRepository>,
	pub notifier: Arc<WebhookNotifier>,
}

/// Builds the services and subscribes `config.watch_addresses`.
///
/// No request is sent to the node or the webhook here.
pub async fn initialize_services(config: &ServiceConfig) -> Result<Services> {
	let client = EvmClient::new(config)
		.map_err(|e| format!("Failed to create chain client: {}", e))?;

	// Without a webhook the notifier is never called; build it with default settings.
	let webhook = config
		.webhook
		.clone()
		.unwrap_or_else(|| WebhookConfig::new(String::new()));
	let http_client = reqwest::Client::builder().timeout(WEBHOOK_TIMEOUT).build()?;
	let http_client = create_retryable_http_client::<DefaultRetryableStrategy>(
		&RetryConfig::no_retries(),
		http_client,
		None,
	);
	let notifier = WebhookNotifier::new(&webhook, Arc::new(http_client))?;

	let subscriptions = Arc::new(SubscriptionRepository::new());
	for address in &config.watch_addresses {
		subscriptions.subscribe(address).await;
	}

	Ok(Services {
		client: Arc::new(client),
		subscriptions,
		transactions: Arc::new(TransactionRepository::new()),
		notifier: Arc::new(notifier),
	})
}

/// Polling engine over `services`, delivering to the configured webhook if any.
pub fn create_block_watcher(services: &Services, config: &ServiceConfig) -> MonitorWatcher {
	BlockWatcherService::new(
		services.client.clone(),
		services.subscriptions.clone(),
		services.transactions.clone(),
		services.notifier.clone(),
		config.poller.clone(),
		config.webhook.as_ref().map(|webhook| webhook.url.clone()),
	)
}

pub fn create_address_monitor(services: &Services) -> Arc<dyn AddressMonitorTrait> {
	Arc::new(AddressMonitor::new(
		services.client.clone(),
		services.subscriptions.clone(),
		services.transactions.clone(),
	))
}
