//! Domain models and data structures.
//!
//! - `blockchain`: raw JSON-RPC shapes as returned by the node
//! - `config`: service configuration loading and validation
//! - `core`: chain-agnostic domain types

mod blockchain;
mod config;
mod core;

pub use blockchain::evm::{EVMBlock, EVMTransaction};

pub use core::Transaction;

pub use config::{
	ApiConfig, ConfigError, ConfigLoader, MetricsConfig, PollerConfig, ServiceConfig,
	WebhookConfig, DEFAULT_CONFIG_PATH,
};
