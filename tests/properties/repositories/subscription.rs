use std::collections::HashSet;

use crate::properties::strategies::{address_strategy, runtime};

use address_monitor::repositories::{SubscriptionRepository, SubscriptionRepositoryTrait};
use proptest::{prelude::*, test_runner::Config};

proptest! {
	#![proptest_config(Config {
		failure_persistence: None,
		..Config::default()
	})]

	// Only the first subscription of an address reports true
	#[test]
	fn test_subscribe_reports_first_insert_only(
		addresses in proptest::collection::vec(address_strategy(), 1..20)
	) {
		runtime().block_on(async {
			let repo = SubscriptionRepository::new();
			let mut seen = HashSet::new();

			for address in &addresses {
				let added = repo.subscribe(address).await;
				prop_assert_eq!(added, seen.insert(address.clone()));
			}

			prop_assert_eq!(repo.snapshot().await, seen.clone());
			prop_assert_eq!(repo.count().await, seen.len());
			Ok(())
		})?;
	}

	// Addresses are kept verbatim, including invalid ones
	#[test]
	fn test_subscribe_stores_any_string(address in ".{0,64}") {
		runtime().block_on(async {
			let repo = SubscriptionRepository::new();
			prop_assert!(repo.subscribe(&address).await);
			prop_assert!(repo.snapshot().await.contains(&address));
			Ok(())
		})?;
	}
}
