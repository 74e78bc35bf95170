//! Shared helpers for the crate-level test suites.

use ethereum_types::H256;

use crate::code::keccak;
use crate::opcodes::immediate_size;

/// Bit-by-bit reference for the PUSH data classification.
///
/// `data[i]` is true iff offset `i` is immediate data of a PUSH reached by
/// the linear scan. Deliberately naive: no ranges, no bit packing.
#[allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]
pub fn reference_push_data(code: &[u8]) -> Vec<bool> {
    let mut data = vec![false; code.len()];
    let mut pc = 0;
    while pc < code.len() {
        let immediates = immediate_size(code[pc]);
        for i in 1..=immediates {
            if let Some(bit) = data.get_mut(pc + i) {
                *bit = true;
            }
        }
        pc += 1 + immediates;
    }
    data
}

pub fn hash_of(code: &[u8]) -> H256 {
    keccak(code)
}

/// Decode a hex fixture, ignoring whitespace.
pub fn bytecode(hex_str: &str) -> Vec<u8> {
    let compact: String = hex_str.split_whitespace().collect();
    hex::decode(compact).expect("valid hex fixture")
}

/// Route index logs to the test harness. Filter with `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
