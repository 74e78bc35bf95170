use bytes::Bytes;
use ethereum_types::H256;
use sha3::{Digest, Keccak256};

use crate::analysis::{analyze, jump_targets};

/// Contract bytecode paired with its content hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code {
    pub hash: H256,
    pub bytecode: Bytes,
}

impl Code {
    /// Wrap `bytecode`, hashing it with keccak256.
    pub fn from_bytecode(bytecode: Bytes) -> Self {
        let hash = keccak(&bytecode);
        Self { hash, bytecode }
    }

    /// Wrap `bytecode` with a hash the caller already computed.
    ///
    /// The hash is not checked; a wrong one poisons every index the code
    /// is looked up in.
    pub fn from_bytecode_unchecked(bytecode: Bytes, hash: H256) -> Self {
        Self { hash, bytecode }
    }

    /// Sorted offsets of every valid `JUMPDEST`.
    pub fn compute_jump_targets(&self) -> Vec<u32> {
        jump_targets(&self.bytecode, &analyze(&self.bytecode))
    }

    pub fn len(&self) -> usize {
        self.bytecode.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytecode.is_empty()
    }
}

pub fn keccak(data: impl AsRef<[u8]>) -> H256 {
    H256(Keccak256::digest(data.as_ref()).into())
}
