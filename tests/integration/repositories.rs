use std::sync::Arc;

use address_monitor::{
	repositories::{
		SubscriptionRepository, SubscriptionRepositoryTrait, TransactionRepository,
		TransactionRepositoryTrait,
	},
	utils::tests::builders::TransactionBuilder,
};
use futures::future::join_all;

const WATCHED: &str = "0x1111111111111111111111111111111111111111";

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_subscribe_yields_exactly_one_true() {
	let repository = Arc::new(SubscriptionRepository::new());

	let tasks = (0..64).map(|_| {
		let repository = repository.clone();
		tokio::spawn(async move { repository.subscribe(WATCHED).await })
	});

	let results: Vec<bool> = join_all(tasks)
		.await
		.into_iter()
		.map(|result| result.unwrap())
		.collect();

	assert_eq!(results.iter().filter(|added| **added).count(), 1);
	assert_eq!(repository.count().await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_appends_are_all_kept() {
	let repository = Arc::new(TransactionRepository::new());

	let tasks = (0..50u64).map(|block_number| {
		let repository = repository.clone();
		tokio::spawn(async move {
			let tx = TransactionBuilder::new().block_number(block_number).build();
			repository.append(WATCHED, tx).await;
		})
	});
	for result in join_all(tasks).await {
		result.unwrap();
	}

	let mut blocks: Vec<u64> = repository
		.list(WATCHED)
		.await
		.iter()
		.map(|tx| tx.block_number())
		.collect();
	blocks.sort_unstable();
	assert_eq!(blocks, (0..50).collect::<Vec<_>>());
}
