use address_monitor::{
	models::ServiceConfig,
	services::blockchain::{
		BlockChainError, BlockchainTransport, ChainClient, EvmClient, HttpTransportClient,
		TransportError,
	},
	utils::RetryConfig,
};
use mockito::{Matcher, Server};
use serde_json::{json, Value};

fn transport(url: &str) -> HttpTransportClient {
	HttpTransportClient::new(url, &RetryConfig::no_retries()).unwrap()
}

#[tokio::test]
async fn test_send_raw_request_returns_envelope() {
	let mut server = Server::new_async().await;
	let mock = server
		.mock("POST", "/")
		.match_header("content-type", "application/json")
		.match_body(Matcher::PartialJson(json!({
			"jsonrpc": "2.0",
			"method": "eth_blockNumber",
			"params": []
		})))
		.with_status(200)
		.with_body(r#"{"jsonrpc":"2.0","id":1,"result":"0x10"}"#)
		.create_async()
		.await;

	let response = transport(&server.url())
		.send_raw_request::<Value>("eth_blockNumber", None)
		.await
		.unwrap();

	assert_eq!(response["result"], "0x10");
	mock.assert_async().await;
}

#[tokio::test]
async fn test_send_raw_request_rpc_error() {
	let mut server = Server::new_async().await;
	let mock = server
		.mock("POST", "/")
		.with_status(200)
		.with_body(r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32602,"message":"invalid argument"}}"#)
		.create_async()
		.await;

	let err = transport(&server.url())
		.send_raw_request("eth_getBalance", Some(json!(["0x0", "latest"])))
		.await
		.unwrap_err();

	match err {
		TransportError::Rpc { code, message, .. } => {
			assert_eq!(code, -32602);
			assert_eq!(message, "invalid argument");
		}
		other => panic!("unexpected error: {:?}", other),
	}
	mock.assert_async().await;
}

#[tokio::test]
async fn test_send_raw_request_http_error() {
	let mut server = Server::new_async().await;
	let mock = server
		.mock("POST", "/")
		.with_status(503)
		.with_body("unavailable")
		.expect(1)
		.create_async()
		.await;

	let err = transport(&server.url())
		.send_raw_request::<Value>("eth_blockNumber", None)
		.await
		.unwrap_err();

	match err {
		TransportError::Http {
			status_code, body, ..
		} => {
			assert_eq!(status_code.as_u16(), 503);
			assert_eq!(body, "unavailable");
		}
		other => panic!("unexpected error: {:?}", other),
	}
	mock.assert_async().await;
}

#[tokio::test]
async fn test_middleware_retries_transient_statuses() {
	let mut server = Server::new_async().await;
	let failing = server
		.mock("POST", "/")
		.with_status(502)
		.expect(3)
		.create_async()
		.await;

	let retry = RetryConfig {
		max_retries: 2,
		initial_backoff_ms: 1,
		max_backoff_ms: 1,
		..RetryConfig::default()
	};
	let transport = HttpTransportClient::new(&server.url(), &retry).unwrap();

	let err = transport
		.send_raw_request::<Value>("eth_blockNumber", None)
		.await
		.unwrap_err();

	assert!(matches!(err, TransportError::Http { .. }));
	failing.assert_async().await;
}

#[tokio::test]
async fn test_send_raw_request_unparseable_body() {
	let mut server = Server::new_async().await;
	server
		.mock("POST", "/")
		.with_status(200)
		.with_body("<html>not json</html>")
		.create_async()
		.await;

	let err = transport(&server.url())
		.send_raw_request::<Value>("eth_blockNumber", None)
		.await
		.unwrap_err();
	assert!(matches!(err, TransportError::ResponseParse(_)));
}

#[tokio::test]
async fn test_try_connect() {
	let mut server = Server::new_async().await;
	let mock = server
		.mock("POST", "/")
		.match_body(Matcher::PartialJson(json!({"method": "net_version"})))
		.with_status(200)
		.with_body(r#"{"jsonrpc":"2.0","id":1,"result":"1"}"#)
		.create_async()
		.await;

	assert!(transport(&server.url()).try_connect().await.is_ok());
	mock.assert_async().await;
}

#[tokio::test]
async fn test_evm_client_over_http() {
	let mut server = Server::new_async().await;
	server
		.mock("POST", "/")
		.match_body(Matcher::PartialJson(json!({"method": "eth_blockNumber"})))
		.with_status(200)
		.with_body(r#"{"jsonrpc":"2.0","id":1,"result":"0x64"}"#)
		.create_async()
		.await;
	server
		.mock("POST", "/")
		.match_body(Matcher::PartialJson(json!({"method": "eth_getBalance"})))
		.with_status(200)
		.with_body(r#"{"jsonrpc":"2.0","id":2,"result":"not hex"}"#)
		.create_async()
		.await;

	let config = ServiceConfig {
		rpc_url: server.url(),
		..ServiceConfig::default()
	};
	let client = EvmClient::new(&config).unwrap();

	assert_eq!(client.current_height().await.unwrap(), 100);
	assert!(matches!(
		client
			.balance("0x1111111111111111111111111111111111111111")
			.await,
		Err(BlockChainError::DecodeError(_))
	));
}
