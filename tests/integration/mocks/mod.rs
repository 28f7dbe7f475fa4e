//! Mock implementations for testing purposes.
//!
//! This module contains mock implementations of the traits at the service seams:
//! - JSON-RPC transport
//! - Chain client
//! - Transaction notifier
//!
//! The mocks are implemented using the `mockall` crate.

mod clients;
mod services;
mod transports;
#[allow(unused_imports)]
pub use clients::*;
#[allow(unused_imports)]
pub use services::*;
#[allow(unused_imports)]
pub use transports::*;
