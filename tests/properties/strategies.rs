use address_monitor::{models::Transaction, utils::tests::builders::TransactionBuilder};
use alloy::primitives::U256;
use proptest::prelude::*;
use tokio::runtime::Runtime;

pub fn address_strategy() -> impl Strategy<Value = String> {
	"[0-9a-f]{40}".prop_map(|hex| format!("0x{}", hex))
}

/// Small pool so that generated transactions frequently share addresses.
pub fn pooled_address_strategy() -> impl Strategy<Value = String> {
	prop::sample::select(vec![
		"0x1111111111111111111111111111111111111111".to_string(),
		"0x2222222222222222222222222222222222222222".to_string(),
		"0x3333333333333333333333333333333333333333".to_string(),
	])
}

pub fn transaction_strategy() -> impl Strategy<Value = Transaction> {
	(
		"[0-9a-f]{64}",
		address_strategy(),
		proptest::option::of(address_strategy()),
		any::<u128>(),
		0u64..50_000_000,
	)
		.prop_map(|(hash, from, to, value, block_number)| {
			let builder = TransactionBuilder::new()
				.hash(&format!("0x{}", hash))
				.from(&from)
				.value(U256::from(value))
				.block_number(block_number);
			match to {
				Some(to) => builder.to(&to).build(),
				None => builder.contract_creation().build(),
			}
		})
}

pub fn runtime() -> Runtime {
	tokio::runtime::Builder::new_current_thread()
		.enable_all()
		.build()
		.unwrap()
}
