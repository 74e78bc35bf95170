//! Opcode facts needed by jump destination analysis.
//!
//! Only the immediate operand length of each opcode matters here: the
//! analysis never decodes operand values.

pub const STOP: u8 = 0x00;
pub const JUMP: u8 = 0x56;
pub const JUMPI: u8 = 0x57;
pub const JUMPDEST: u8 = 0x5B;
pub const PUSH0: u8 = 0x5F;
pub const PUSH1: u8 = 0x60;
pub const PUSH2: u8 = 0x61;
pub const PUSH4: u8 = 0x63;
pub const PUSH32: u8 = 0x7F;

/// Largest immediate operand carried by any opcode (PUSH32).
pub const MAX_IMMEDIATE_SIZE: usize = 32;

// Lookup table instead of a range check: one load per instruction in the
// scan loop.
#[allow(
    clippy::as_conversions,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]
const IMMEDIATE_SIZES: [u8; 256] = const {
    let mut table = [0u8; 256];
    let mut opcode = PUSH1;
    while opcode <= PUSH32 {
        // PUSH1 = 0x60 pushes 1 byte, PUSH32 = 0x7f pushes 32 bytes
        table[opcode as usize] = opcode - PUSH0;
        opcode += 1;
    }
    table
};

/// Returns the number of immediate bytes following `opcode`.
///
/// `PUSH1..=PUSH32` yield 1..=32. Every other byte, `PUSH0` and
/// undefined opcodes included, yields 0.
#[inline]
pub fn immediate_size(opcode: u8) -> usize {
    #[expect(clippy::indexing_slicing)] // table has 256 entries
    let size = IMMEDIATE_SIZES[usize::from(opcode)];
    usize::from(size)
}

/// Whether `opcode` is a push that carries immediate data.
#[inline]
pub fn is_push(opcode: u8) -> bool {
    immediate_size(opcode) != 0
}
