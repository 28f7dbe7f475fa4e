//! actix-web routes for subscribing addresses and querying the monitor.

use actix_web::{
	middleware::{Compress, NormalizePath},
	web, App, HttpResponse, HttpServer, Responder,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::services::{
	address_monitor::AddressMonitorTrait,
	blockchain::{is_valid_address, BlockChainError},
};

pub type MonitorData = web::Data<Arc<dyn AddressMonitorTrait>>;

#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
	pub address: String,
}

#[derive(Debug, Deserialize)]
pub struct AddressQuery {
	pub address: Option<String>,
}

fn bad_request(message: &str) -> HttpResponse {
	HttpResponse::BadRequest().json(json!({ "error": message }))
}

fn node_error(error: &BlockChainError) -> HttpResponse {
	match error {
		BlockChainError::InvalidAddress(_) => bad_request("Invalid address"),
		_ => HttpResponse::BadGateway().json(json!({ "error": error.to_string() })),
	}
}

async fn subscribe(monitor: MonitorData, body: web::Json<SubscribeRequest>) -> impl Responder {
	let success = monitor.subscribe(&body.address).await;
	HttpResponse::Ok().json(json!({ "success": success }))
}

async fn transactions(monitor: MonitorData, query: web::Query<AddressQuery>) -> impl Responder {
	let Some(address) = query.address.as_deref().filter(|a| !a.is_empty()) else {
		return bad_request("Missing address");
	};
	HttpResponse::Ok().json(monitor.get_transactions(address).await)
}

async fn current_block(monitor: MonitorData) -> impl Responder {
	match monitor.get_current_block().await {
		Ok(block) => HttpResponse::Ok().json(json!({ "block": block })),
		Err(e) => node_error(&e),
	}
}

async fn balance(monitor: MonitorData, query: web::Query<AddressQuery>) -> impl Responder {
	let Some(address) = query.address.as_deref() else {
		return bad_request("Missing address");
	};
	if !is_valid_address(address) {
		return bad_request("Invalid address");
	}

	match monitor.get_balance(address).await {
		Ok(balance) => HttpResponse::Ok().json(json!({
			"address": address,
			"balance": balance.to_string(),
		})),
		Err(e) => node_error(&e),
	}
}

/// Registers the monitor routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
	cfg.route("/subscribe", web::post().to(subscribe))
		.route("/transactions", web::get().to(transactions))
		.route("/current-block", web::get().to(current_block))
		.route("/balance", web::get().to(balance));
}

/// Builds the API server bound to `bind_address`. The returned server must be awaited.
pub fn create_api_server(
	bind_address: &str,
	monitor: Arc<dyn AddressMonitorTrait>,
) -> std::io::Result<actix_web::dev::Server> {
	info!("Starting API server on {}", bind_address);

	Ok(HttpServer::new(move || {
		App::new()
			.wrap(Compress::default())
			.wrap(NormalizePath::trim())
			.app_data(web::Data::new(monitor.clone()))
			.configure(configure)
	})
	.bind(bind_address)?
	.shutdown_timeout(5)
	.run())
}
