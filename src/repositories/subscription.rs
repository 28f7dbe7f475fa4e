//! Subscription registry: the set of watched addresses.
//!
//! Addresses are stored verbatim. Syntax is not checked here; an invalid address is
//! rejected later by the chain client on every lookup.

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::RwLock;

/// Insert-once set of watched addresses.
#[async_trait]
pub trait SubscriptionRepositoryTrait: Send + Sync {
	/// Records `address`. Returns `true` only for the call that added it.
	async fn subscribe(&self, address: &str) -> bool;

	/// A copy of the current membership. Iteration order is unspecified.
	async fn snapshot(&self) -> HashSet<String>;

	async fn count(&self) -> usize;
}

#[derive(Debug, Default)]
pub struct SubscriptionRepository {
	addresses: RwLock<HashSet<String>>,
}

impl SubscriptionRepository {
	pub fn new() -> Self {
		Self::default()
	}
}

impl<S: Into<String>> FromIterator<S> for SubscriptionRepository {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		Self {
			addresses: RwLock::new(iter.into_iter().map(Into::into).collect()),
		}
	}
}

#[async_trait]
impl SubscriptionRepositoryTrait for SubscriptionRepository {
	async fn subscribe(&self, address: &str) -> bool {
		// Membership test and insert happen under one write lock.
		let added = self.addresses.write().await.insert(address.to_string());
		if added {
			tracing::info!(address, "Subscribed address");
		}
		added
	}

	async fn snapshot(&self) -> HashSet<String> {
		self.addresses.read().await.clone()
	}

	async fn count(&self) -> usize {
		self.addresses.read().await.len()
	}
}
