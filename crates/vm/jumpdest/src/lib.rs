//! # Jump destination analysis
//!
//! Decides whether a JUMP/JUMPI target is legal in a piece of EVM
//! bytecode. A target is legal only if it holds a `JUMPDEST` opcode that
//! is an actual instruction: a `0x5b` byte sitting inside PUSH immediate
//! data is rejected.
//!
//! ## Architecture
//!
//! ```text
//! interpreter (JUMP / JUMPI)
//!        │ is_valid_jump_destination(hash, code, target)
//!        ▼
//! DestinationIndex ──miss──▶ analyze() ──▶ opcodes::immediate_size
//!   (AnalysisStore) ◀─publish─ CodeBitmap
//! ```
//!
//! - [`opcodes`]: immediate operand length per opcode
//! - [`analysis`]: single linear scan producing a [`CodeBitmap`]
//! - [`index::DestinationIndex`]: per-instance cache keyed by code hash
//! - [`validity`]: the bounds + bitmap + opcode decision
//!
//! ## Usage
//!
//! ```
//! use ethrex_jumpdest::{Code, DestinationIndex};
//! use ethereum_types::U256;
//!
//! let index = DestinationIndex::new();
//! // PUSH1 0x5b JUMPDEST
//! let code = Code::from_bytecode(vec![0x60u8, 0x5b, 0x5b].into());
//!
//! assert!(!index.is_valid_jump_destination_for(&code, U256::from(1u64)));
//! assert!(index.is_valid_jump_destination_for(&code, U256::from(2u64)));
//! ```

pub mod analysis;
pub mod bitmap;
pub mod code;
pub mod config;
pub mod errors;
pub mod index;
pub mod metrics;
pub mod opcodes;
pub mod store;
pub mod validity;

pub use analysis::analyze;
pub use bitmap::CodeBitmap;
pub use code::Code;
pub use config::JumpdestConfig;
pub use errors::{ConfigError, JumpError};
pub use index::DestinationIndex;
pub use metrics::{IndexMetrics, MetricsSnapshot};
pub use store::{AnalysisStore, BoundedStore};
pub use validity::JumpTarget;

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::as_conversions,
    clippy::arithmetic_side_effects,
    clippy::indexing_slicing
)]
mod tests;
