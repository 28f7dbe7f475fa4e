use address_monitor::utils::{parse_hex_u256, parse_hex_u64};
use alloy::primitives::U256;
use proptest::{prelude::*, test_runner::Config};

proptest! {
	#![proptest_config(Config {
		failure_persistence: None,
		..Config::default()
	})]

	#[test]
	fn test_hex_u64_accepts_any_formatted_value(value in any::<u64>()) {
		prop_assert_eq!(parse_hex_u64(&format!("0x{:x}", value)), Ok(value));
		prop_assert_eq!(parse_hex_u64(&format!("0x{:X}", value)), Ok(value));
	}

	#[test]
	fn test_hex_u256_accepts_any_formatted_value(value in any::<u128>()) {
		prop_assert_eq!(parse_hex_u256(&format!("0x{:x}", value)), Ok(U256::from(value)));
	}

	#[test]
	fn test_hex_requires_prefix(value in any::<u64>()) {
		let unprefixed = format!("{:x}", value);
		prop_assert!(parse_hex_u64(&unprefixed).is_err());
		prop_assert!(parse_hex_u256(&unprefixed).is_err());
	}

	#[test]
	fn test_hex_rejects_non_hex_digits(suffix in "[g-z]{1,8}") {
		let bare = format!("0x{}", suffix);
		let trailing = format!("0x1{}", suffix);
		prop_assert!(parse_hex_u64(&bare).is_err());
		prop_assert!(parse_hex_u256(&trailing).is_err());
	}
}
