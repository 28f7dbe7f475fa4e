#![no_main]

use address_monitor::utils::{parse_hex_u256, parse_hex_u64};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);
    let _ = parse_hex_u64(&input);
    let _ = parse_hex_u256(&input);
});
