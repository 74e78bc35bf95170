//! Jump destination validity checks.
//!
//! A destination is valid iff it is inside the code, holds a `JUMPDEST`
//! byte, and that byte is an instruction rather than PUSH immediate data.
//! Rejection is the normal answer for adversarial input and is reported
//! as `false`, never as a panic.

use std::fmt::Display;

use ethereum_types::{H256, U256};

use crate::analysis::jump_targets;
use crate::bitmap::CodeBitmap;
use crate::code::Code;
use crate::errors::JumpError;
use crate::index::DestinationIndex;
use crate::opcodes::JUMPDEST;
use crate::store::AnalysisStore;

/// Targets needing this many bits or more are rejected outright.
pub const MAX_TARGET_BITS: usize = 63;

/// Smallest `u64` whose bit length reaches [`MAX_TARGET_BITS`].
const FIRST_REJECTED_U64: u64 = 1 << 62;

/// A jump destination as popped off the stack.
///
/// Implementors convert to a code offset without ever wrapping: anything
/// that needs [`MAX_TARGET_BITS`] bits or more maps to `None`.
pub trait JumpTarget {
    fn as_offset(&self) -> Option<u64>;
}

impl JumpTarget for U256 {
    fn as_offset(&self) -> Option<u64> {
        (self.bits() < MAX_TARGET_BITS).then(|| self.low_u64())
    }
}

impl JumpTarget for u64 {
    fn as_offset(&self) -> Option<u64> {
        (*self < FIRST_REJECTED_U64).then_some(*self)
    }
}

impl JumpTarget for u32 {
    fn as_offset(&self) -> Option<u64> {
        Some(u64::from(*self))
    }
}

impl JumpTarget for usize {
    fn as_offset(&self) -> Option<u64> {
        u64::try_from(*self).ok()?.as_offset()
    }
}

impl<T: JumpTarget + ?Sized> JumpTarget for &T {
    fn as_offset(&self) -> Option<u64> {
        (**self).as_offset()
    }
}

/// Offset of `target` inside `code`, if it is in bounds.
fn offset_in(code: &[u8], target: &impl JumpTarget) -> Option<usize> {
    let offset = usize::try_from(target.as_offset()?).ok()?;
    (offset < code.len()).then_some(offset)
}

/// Check `offset` against an already computed analysis of `code`.
pub fn is_jumpdest(code: &[u8], bitmap: &CodeBitmap, offset: usize) -> bool {
    code.get(offset) == Some(&JUMPDEST) && !bitmap.get(offset)
}

impl<S: AnalysisStore> DestinationIndex<S> {
    /// Whether a JUMP/JUMPI to `target` is allowed in `code`.
    ///
    /// Out-of-range targets are rejected before the index is consulted,
    /// so they never trigger a scan.
    pub fn is_valid_jump_destination(
        &self,
        code_hash: H256,
        code: &[u8],
        target: impl JumpTarget,
    ) -> bool {
        let Some(offset) = offset_in(code, &target) else {
            return false;
        };
        let bitmap = self.get_or_compute(code_hash, code);
        is_jumpdest(code, &bitmap, offset)
    }

    /// Same as [`Self::is_valid_jump_destination`] for a hashed [`Code`].
    pub fn is_valid_jump_destination_for(&self, code: &Code, target: impl JumpTarget) -> bool {
        self.is_valid_jump_destination(code.hash, &code.bytecode, target)
    }

    /// Sorted offsets of every valid `JUMPDEST` in `code`, using the
    /// indexed analysis instead of scanning again.
    pub fn jump_targets(&self, code: &Code) -> Vec<u32> {
        let bitmap = self.get_or_compute(code.hash, &code.bytecode);
        jump_targets(&code.bytecode, &bitmap)
    }

    /// Resolve a jump for an opcode handler: the new program counter on
    /// success, [`JumpError::InvalidJumpDestination`] otherwise.
    pub fn resolve_jump<T: JumpTarget + Display>(
        &self,
        code_hash: H256,
        code: &[u8],
        target: T,
    ) -> Result<usize, JumpError> {
        let invalid = || JumpError::InvalidJumpDestination {
            target: target.to_string(),
        };
        let offset = offset_in(code, &target).ok_or_else(invalid)?;
        let bitmap = self.get_or_compute(code_hash, code);
        if is_jumpdest(code, &bitmap, offset) {
            Ok(offset)
        } else {
            Err(invalid())
        }
    }
}
