//! Core services implementing the business logic.
//!
//! - `address_monitor`: Facade over the chain client and repositories
//! - `blockchain`: Chain client interfaces and the JSON-RPC implementation
//! - `blockwatcher`: Polling engine
//! - `notification`: Delivery of matched transactions

pub mod address_monitor;
pub mod blockchain;
pub mod blockwatcher;
pub mod notification;
