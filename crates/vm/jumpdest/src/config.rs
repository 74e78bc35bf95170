//! Configuration for the jump destination index.

use std::env;

use crate::errors::ConfigError;

/// Env var overriding [`JumpdestConfig::max_cache_entries`].
pub const CACHE_ENTRIES_ENV: &str = "ETHREX_JUMPDEST_CACHE_ENTRIES";

/// Default number of analysed bytecodes kept per index.
pub const DEFAULT_MAX_CACHE_ENTRIES: usize = 4096;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JumpdestConfig {
    /// Maximum number of bitmaps kept before the oldest is evicted.
    /// `0` disables eviction.
    pub max_cache_entries: usize,
}

impl JumpdestConfig {
    /// Build a config from the process environment.
    ///
    /// Unset variables fall back to the defaults; malformed values are an
    /// error rather than being silently ignored.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let max_cache_entries = match lookup(CACHE_ENTRIES_ENV) {
            Some(raw) => raw.trim().parse::<usize>().map_err(|source| {
                ConfigError::InvalidInteger {
                    name: CACHE_ENTRIES_ENV.to_owned(),
                    source,
                }
            })?,
            None => DEFAULT_MAX_CACHE_ENTRIES,
        };

        Ok(Self { max_cache_entries })
    }

    /// Whether the index grows without bound.
    pub fn is_unbounded(&self) -> bool {
        self.max_cache_entries == 0
    }
}

impl Default for JumpdestConfig {
    fn default() -> Self {
        Self {
            max_cache_entries: DEFAULT_MAX_CACHE_ENTRIES,
        }
    }
}
