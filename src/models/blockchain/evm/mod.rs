//! Raw EVM JSON-RPC shapes.

mod block;
mod transaction;

pub use block::EVMBlock;
pub use transaction::EVMTransaction;
