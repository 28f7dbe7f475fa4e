//! HTTP API over the real facade, repositories and a mocked chain client.

use std::sync::Arc;

use actix_web::{http::StatusCode, test, web, App};
use address_monitor::{
	api::configure,
	repositories::{
		SubscriptionRepository, SubscriptionRepositoryTrait, TransactionRepository,
		TransactionRepositoryTrait,
	},
	services::{
		address_monitor::{AddressMonitor, AddressMonitorTrait},
		blockchain::BlockChainError,
	},
	utils::tests::builders::TransactionBuilder,
};
use alloy::primitives::U256;
use serde_json::{json, Value};

use crate::integration::mocks::MockChainClient;

const WATCHED: &str = "0x1111111111111111111111111111111111111111";

struct Fixture {
	monitor: Arc<dyn AddressMonitorTrait>,
	subscriptions: Arc<SubscriptionRepository>,
	transactions: Arc<TransactionRepository>,
}

fn fixture(client: MockChainClient) -> Fixture {
	let subscriptions = Arc::new(SubscriptionRepository::new());
	let transactions = Arc::new(TransactionRepository::new());
	let monitor = Arc::new(AddressMonitor::new(
		Arc::new(client),
		subscriptions.clone(),
		transactions.clone(),
	));
	Fixture {
		monitor,
		subscriptions,
		transactions,
	}
}

#[actix_web::test]
async fn test_subscribe_then_query_transactions() {
	let fixture = fixture(MockChainClient::new());
	let app = test::init_service(
		App::new()
			.app_data(web::Data::new(fixture.monitor.clone()))
			.configure(configure),
	)
	.await;

	let req = test::TestRequest::post()
		.uri("/subscribe")
		.set_json(json!({ "address": WATCHED }))
		.to_request();
	let body: Value = test::call_and_read_body_json(&app, req).await;
	assert_eq!(body, json!({ "success": true }));
	assert_eq!(fixture.subscriptions.count().await, 1);

	let req = test::TestRequest::post()
		.uri("/subscribe")
		.set_json(json!({ "address": WATCHED }))
		.to_request();
	let body: Value = test::call_and_read_body_json(&app, req).await;
	assert_eq!(body, json!({ "success": false }));

	fixture
		.transactions
		.append(WATCHED, TransactionBuilder::new().hash("0x01").build())
		.await;
	fixture
		.transactions
		.append(WATCHED, TransactionBuilder::new().hash("0x02").contract_creation().build())
		.await;

	let req = test::TestRequest::get()
		.uri(&format!("/transactions?address={}", WATCHED))
		.to_request();
	let body: Value = test::call_and_read_body_json(&app, req).await;
	assert_eq!(body[0]["hash"], "0x01");
	assert_eq!(body[1]["hash"], "0x02");
	assert_eq!(body[1]["to"], Value::Null);
}

#[actix_web::test]
async fn test_subscribe_rejects_malformed_body() {
	let fixture = fixture(MockChainClient::new());
	let app = test::init_service(
		App::new()
			.app_data(web::Data::new(fixture.monitor.clone()))
			.configure(configure),
	)
	.await;

	let req = test::TestRequest::post()
		.uri("/subscribe")
		.set_json(json!({ "wallet": WATCHED }))
		.to_request();
	let resp = test::call_service(&app, req).await;
	assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
	assert_eq!(fixture.subscriptions.count().await, 0);
}

#[actix_web::test]
async fn test_current_block_and_balance_read_from_node() {
	let mut client = MockChainClient::new();
	client.expect_current_height().returning(|| Ok(19_000_000));
	client
		.expect_balance()
		.withf(|address| address == WATCHED)
		.returning(|_| Ok(U256::from(123u64)));

	let fixture = fixture(client);
	let app = test::init_service(
		App::new()
			.app_data(web::Data::new(fixture.monitor.clone()))
			.configure(configure),
	)
	.await;

	let req = test::TestRequest::get().uri("/current-block").to_request();
	let body: Value = test::call_and_read_body_json(&app, req).await;
	assert_eq!(body, json!({ "block": 19_000_000 }));

	let req = test::TestRequest::get()
		.uri(&format!("/balance?address={}", WATCHED))
		.to_request();
	let body: Value = test::call_and_read_body_json(&app, req).await;
	assert_eq!(body, json!({ "address": WATCHED, "balance": "123" }));
}

#[actix_web::test]
async fn test_node_failures_map_to_bad_gateway() {
	let mut client = MockChainClient::new();
	client
		.expect_current_height()
		.returning(|| Err(BlockChainError::transport_error("down", None, None)));
	client
		.expect_balance()
		.returning(|_| Err(BlockChainError::decode_error("garbage", None, None)));

	let fixture = fixture(client);
	let app = test::init_service(
		App::new()
			.app_data(web::Data::new(fixture.monitor.clone()))
			.configure(configure),
	)
	.await;

	let req = test::TestRequest::get().uri("/current-block").to_request();
	assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_GATEWAY);

	let req = test::TestRequest::get()
		.uri(&format!("/balance?address={}", WATCHED))
		.to_request();
	assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_GATEWAY);
}
