//! Parsing helpers for command-line and configuration values.

use alloy::primitives::U256;
use byte_unit::Byte;
use std::str::FromStr;
use url::Url;

fn strip_hex_prefix(s: &str) -> Result<&str, String> {
	let digits = s
		.strip_prefix("0x")
		.ok_or_else(|| format!("Missing 0x prefix in hex quantity '{}'", s))?;
	if digits.is_empty() {
		return Err(format!("Empty hex quantity '{}'", s));
	}
	if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
		return Err(format!("Invalid hex digits in '{}'", s));
	}
	Ok(digits)
}

/// Parses an RPC hex quantity such as `"0x1b4"` into a `u64`.
///
/// The `0x` prefix is mandatory and the payload must be non-empty hexadecimal.
pub fn parse_hex_u64(s: &str) -> Result<u64, String> {
	let digits = strip_hex_prefix(s)?;
	u64::from_str_radix(digits, 16).map_err(|e| format!("Hex quantity '{}' out of range: {}", s, e))
}

/// Parses an RPC hex quantity into a 256-bit unsigned integer.
pub fn parse_hex_u256(s: &str) -> Result<U256, String> {
	let digits = strip_hex_prefix(s)?;
	U256::from_str_radix(digits, 16).map_err(|e| format!("Hex quantity '{}' out of range: {}", s, e))
}

/// Parses a human-readable size such as `"1GB"` or `"512MiB"` into bytes.
pub fn parse_string_to_bytes_size(s: &str) -> Result<u64, String> {
	Byte::from_str(s)
		.map(|byte| byte.as_u64())
		.map_err(|e| format!("Invalid size format: '{}'. Error: {}", s, e))
}

/// Parses `s` as an absolute `http` or `https` URL.
pub fn parse_http_url(s: &str) -> Result<Url, String> {
	let trimmed = s.trim();
	if trimmed.is_empty() {
		return Err("URL must not be empty".to_string());
	}

	let url = Url::parse(trimmed).map_err(|e| format!("Invalid URL '{}': {}", trimmed, e))?;
	match url.scheme() {
		"http" | "https" => Ok(url),
		other => Err(format!(
			"Unsupported URL scheme '{}' in '{}', expected http or https",
			other, trimmed
		)),
	}
}
