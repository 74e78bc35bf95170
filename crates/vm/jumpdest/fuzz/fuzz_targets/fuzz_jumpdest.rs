#![no_main]

use ethereum_types::H256;
use ethrex_jumpdest::analysis::jump_targets;
use ethrex_jumpdest::opcodes::JUMPDEST;
use ethrex_jumpdest::{DestinationIndex, analyze};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Feed arbitrary bytes as EVM bytecode
    let index = DestinationIndex::new();
    let hash = H256::zero();

    // Property 1: the analysis must never panic
    let bitmap = analyze(data);

    // Property 2: nothing past the code is marked, even for a truncated PUSH
    for i in data.len()..bitmap.as_raw_slice().len() * 8 {
        assert!(!bitmap.get(i), "bit {i} set past code of length {}", data.len());
    }

    // Property 3: the checker agrees with the bitmap and with jump_targets
    let targets = jump_targets(data, &bitmap);
    for (pc, opcode) in data.iter().enumerate() {
        let valid = index.is_valid_jump_destination(hash, data, pc);
        assert_eq!(valid, *opcode == JUMPDEST && !bitmap.get(pc));
        assert_eq!(valid, targets.binary_search(&(pc as u32)).is_ok());
    }
    assert!(!index.is_valid_jump_destination(hash, data, data.len()));
});
