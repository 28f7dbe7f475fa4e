//! In-memory state shared between the polling engine and the HTTP API.
//!
//! - Subscription: the set of watched addresses
//! - Transaction: matched transactions per watched address
//!
//! Both are process-wide, created once at startup and lost on shutdown.

mod subscription;
mod transaction;

pub use subscription::{SubscriptionRepository, SubscriptionRepositoryTrait};
pub use transaction::{TransactionRepository, TransactionRepositoryTrait};
