//! HTTP endpoint exposing the Prometheus registry for scraping.

use actix_web::{
	middleware::{Compress, NormalizePath},
	web, App, HttpResponse, HttpServer, Responder,
};
use std::sync::Arc;
use tracing::{error, info};

use crate::{
	repositories::SubscriptionRepositoryTrait,
	utils::metrics::{gather_metrics, init_metrics, update_system_metrics, SUBSCRIPTIONS},
};

pub type SubscriptionsData = web::Data<Arc<dyn SubscriptionRepositoryTrait>>;

async fn metrics_handler(subscriptions: SubscriptionsData) -> impl Responder {
	update_system_metrics();
	SUBSCRIPTIONS.set(subscriptions.count().await as i64);

	match gather_metrics() {
		Ok(buffer) => HttpResponse::Ok()
			.content_type("text/plain; version=0.0.4; charset=utf-8")
			.body(buffer),
		Err(e) => {
			error!("Error gathering metrics: {}", e);
			HttpResponse::InternalServerError().finish()
		}
	}
}

/// Registers the `/metrics` route.
pub fn configure(cfg: &mut web::ServiceConfig) {
	cfg.route("/metrics", web::get().to(metrics_handler));
}

/// Builds the metrics server bound to `bind_address`. The returned server must be awaited.
pub fn create_metrics_server(
	bind_address: &str,
	subscriptions: Arc<dyn SubscriptionRepositoryTrait>,
) -> std::io::Result<actix_web::dev::Server> {
	init_metrics();
	info!("Starting metrics server on {}", bind_address);

	Ok(HttpServer::new(move || {
		App::new()
			.wrap(Compress::default())
			.wrap(NormalizePath::trim())
			.app_data(web::Data::new(subscriptions.clone()))
			.configure(configure)
	})
	.workers(2)
	.bind(bind_address)?
	.shutdown_timeout(5)
	.run())
}
