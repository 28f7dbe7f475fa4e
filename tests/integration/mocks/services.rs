use address_monitor::{
	models::Transaction,
	services::notification::{NotificationError, TransactionNotifier},
};
use async_trait::async_trait;
use mockall::mock;

mock! {
	pub TransactionNotifier {}

	#[async_trait]
	impl TransactionNotifier for TransactionNotifier {
		async fn notify(
			&self,
			transaction: &Transaction,
			address: &str,
			sink_url: &str,
		) -> Result<(), NotificationError>;
	}
}
