//! Ethereum address monitoring service.
//!
//! This library polls an Ethereum node for new blocks, records every transaction that
//! involves a watched address and forwards each match to a webhook. It includes:
//!
//! - Configuration through a JSON file, environment variables and the command line
//! - A JSON-RPC chain client with retrying HTTP transport
//! - A polling engine with per-address retry and failure isolation
//! - An HTTP API for subscribing addresses and querying matches
//!
//! # Module Structure
//!
//! - `api`: HTTP routes over the monitor facade
//! - `bootstrap`: Bootstraps the application
//! - `models`: Data structures for configuration and chain data
//! - `repositories`: In-memory subscription registry and transaction store
//! - `services`: Core business logic and blockchain interaction
//! - `utils`: Common utilities and helper functions

pub mod api;
pub mod bootstrap;
pub mod models;
pub mod repositories;
pub mod services;
pub mod utils;
