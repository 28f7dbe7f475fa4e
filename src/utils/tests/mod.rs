//! Test helper utilities
//!
//! - `builders`: builders for domain models and raw RPC payloads
//! - `http`: HTTP clients for tests

pub mod builders {
	pub mod evm {
		pub mod block;
	}

	mod transaction;

	pub use evm::block::{rpc_response, RpcBlockBuilder, RpcTransactionBuilder};
	pub use transaction::TransactionBuilder;
}


pub use builders::*;
pub use http::*;
