//! Core domain models.

mod transaction;

pub use transaction::Transaction;
