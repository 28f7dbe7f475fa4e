//! Chain-specific wire models.

pub mod evm;
