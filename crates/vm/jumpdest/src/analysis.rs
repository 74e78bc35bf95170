//! Linear bytecode scan separating instruction starts from PUSH data.
//!
//! Every EVM instruction's encoded length is fixed by its opcode byte, so
//! one left-to-right pass classifies every offset without following jumps.

use crate::bitmap::CodeBitmap;
use crate::opcodes::{JUMPDEST, immediate_size};

/// Scan `code` and mark every offset that is PUSH immediate data.
///
/// A PUSH truncated by the end of the code only marks the bytes that
/// exist.
pub fn analyze(code: &[u8]) -> CodeBitmap {
    let mut bitmap = CodeBitmap::new(code.len());
    let mut pc: usize = 0;

    while let Some(&opcode) = code.get(pc) {
        let data_start = pc.saturating_add(1);
        let next_pc = data_start.saturating_add(immediate_size(opcode));
        if next_pc > data_start {
            bitmap.set_range(data_start, next_pc.min(code.len()));
        }
        pc = next_pc;
    }

    bitmap
}

/// Offsets holding a `JUMPDEST` that the scan placed as an instruction.
///
/// `bitmap` must be the analysis of `code`. Offsets are `u32`: deployed
/// code is capped far below 4 GiB, so an offset that does not fit is a
/// caller bug. Debug builds assert on it; release builds skip the offset.
pub fn jump_targets(code: &[u8], bitmap: &CodeBitmap) -> Vec<u32> {
    code.iter()
        .enumerate()
        .filter(|(pc, opcode)| **opcode == JUMPDEST && !bitmap.get(*pc))
        .filter_map(|(pc, _)| {
            let target = u32::try_from(pc).ok();
            debug_assert!(target.is_some(), "jump target {pc} does not fit in u32");
            target
        })
        .collect()
}
