//! Packed per-offset bitmap produced by the bytecode scan.

use bitvec::prelude::{BitVec, Msb0};

/// Bytes of storage kept past the last code byte.
///
/// A trailing PUSH32 may reach up to 32 bits past the code end; four bytes
/// of slack let range fills near the end stay inside the allocation.
pub const PADDING_BYTES: usize = 4;

/// One bit per code offset. A set bit marks PUSH immediate data, a clear
/// bit marks an offset where the linear scan placed an instruction start.
///
/// Storage is `code_len / 8 + 1 + PADDING_BYTES` bytes, MSB-first within
/// each byte. Bits at or beyond `code_len` carry no meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBitmap {
    bits: BitVec<u8, Msb0>,
    code_len: usize,
}

impl CodeBitmap {
    /// Create an all-clear bitmap able to describe `code_len` offsets.
    pub fn new(code_len: usize) -> Self {
        let storage_bytes = (code_len / 8)
            .saturating_add(1)
            .saturating_add(PADDING_BYTES);
        Self {
            bits: BitVec::repeat(false, storage_bytes.saturating_mul(8)),
            code_len,
        }
    }

    /// Mark every offset in `lo..hi` as immediate data.
    ///
    /// The range is clamped to the allocated storage. `BitSlice::fill`
    /// writes whole bytes where it can.
    pub fn set_range(&mut self, lo: usize, hi: usize) {
        let hi = hi.min(self.bits.len());
        if lo >= hi {
            return;
        }
        if let Some(range) = self.bits.get_mut(lo..hi) {
            range.fill(true);
        }
    }

    /// Whether offset `i` is marked as immediate data.
    pub fn get(&self, i: usize) -> bool {
        self.bits.get(i).is_some_and(|bit| *bit)
    }

    /// Whether `i` is inside the code and starts an instruction.
    pub fn is_code(&self, i: usize) -> bool {
        i < self.code_len && !self.get(i)
    }

    /// Length of the code this bitmap was built for.
    pub fn code_len(&self) -> usize {
        self.code_len
    }

    /// Packed storage, padding included.
    pub fn as_raw_slice(&self) -> &[u8] {
        self.bits.as_raw_slice()
    }
}
