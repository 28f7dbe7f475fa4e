use std::io::Write;

use address_monitor::{
	bootstrap::{create_address_monitor, create_block_watcher, initialize_services},
	models::{ConfigLoader, ServiceConfig},
};
use tempfile::NamedTempFile;

const WATCHED: &str = "0x1111111111111111111111111111111111111111";

fn config_file(contents: &str) -> NamedTempFile {
	let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
	file.write_all(contents.as_bytes()).unwrap();
	file
}

#[tokio::test]
async fn test_services_from_config_file() {
	let file = config_file(&format!(
		r#"{{
			"rpc_url": "http://localhost:8545",
			"webhook": {{ "url": "https://hooks.example.com/tx", "secret": "s3cret" }},
			"poller": {{ "interval_ms": 1000, "max_concurrent_lookups": 2 }},
			"watch_addresses": ["{}"]
		}}"#,
		WATCHED
	));

	let config = ServiceConfig::load_from_path(file.path()).await.unwrap();
	let services = initialize_services(&config).await.unwrap();

	let monitor = create_address_monitor(&services);
	assert!(!monitor.subscribe(WATCHED).await);
	assert!(monitor.get_transactions(WATCHED).await.is_empty());

	let watcher = create_block_watcher(&services, &config);
	assert_eq!(watcher.cursor(), None);
}

#[tokio::test]
async fn test_environment_overrides_file() {
	let file = config_file(r#"{ "rpc_url": "http://localhost:8545" }"#);

	let config = ServiceConfig::resolve(Some(file.path()), |key| match key {
		"ETHEREUM_RPC_URL" => Some("https://node.example.com".to_string()),
		"WEBHOOK_URL" => Some("https://hooks.example.com".to_string()),
		"HTTP_PORT" => Some("9999".to_string()),
		_ => None,
	})
	.unwrap();

	assert!(config.validate().is_ok());
	assert_eq!(config.rpc_url, "https://node.example.com");
	assert_eq!(config.api.port, 9999);
	assert_eq!(
		config.webhook.as_ref().map(|w| w.url.as_str()),
		Some("https://hooks.example.com")
	);
	assert!(initialize_services(&config).await.is_ok());
}

#[tokio::test]
async fn test_invalid_config_is_rejected() {
	let file = config_file(r#"{ "rpc_url": "http://localhost:8545", "poller": { "interval_ms": 0 } }"#);
	assert!(ServiceConfig::load_from_path(file.path()).await.is_err());

	let file = config_file(r#"{ "unknown_field": true }"#);
	assert!(ServiceConfig::load_from_path(file.path()).await.is_err());
}
