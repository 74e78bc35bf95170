use std::num::ParseIntError;

use thiserror::Error;

/// Fault raised by jump handlers when a destination is rejected.
///
/// Validity checks themselves answer with a `bool`; this type exists for
/// interpreter code that wants to propagate the fault with `?`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JumpError {
    #[error("invalid jump destination: {target}")]
    InvalidJumpDestination { target: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid integer in env var {name}: {source}")]
    InvalidInteger { name: String, source: ParseIntError },
}
