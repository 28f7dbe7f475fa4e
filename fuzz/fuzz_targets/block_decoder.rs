#![no_main]

use address_monitor::models::EVMBlock;
use libfuzzer_sys::fuzz_target;

const WATCHED: &str = "0x1111111111111111111111111111111111111111";

fuzz_target!(|data: &[u8]| {
    if let Ok(block) = serde_json::from_slice::<EVMBlock>(data) {
        let _ = block.transactions_for(WATCHED);
        if let Some(tx) = block.transactions.first() {
            let _ = block.transactions_for(&tx.from);
        }
    }
});
