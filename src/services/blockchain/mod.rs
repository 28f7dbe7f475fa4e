//! Chain access: the [`ChainClient`] interface, its EVM implementation and the
//! JSON-RPC transport underneath it.

mod client;
mod clients;
mod error;
mod transports;

pub use client::{is_valid_address, ChainClient, ADDRESS_LENGTH};
pub use clients::EvmClient;
pub use error::BlockChainError;
pub use transports::{
	BlockchainTransport, HttpTransportClient, TransientErrorRetryStrategy, TransportError,
};
